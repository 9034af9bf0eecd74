use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to be relative and free of `..` components.
///
/// Invariant: Never absolute, never escapes its root. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(DomainError::UnsafePathSegment {
                segment: path.display().to_string(),
                context: "relative path".into(),
            });
        }
        Ok(Self(path))
    }

    /// Join a single file or directory name, maintaining the invariant.
    pub fn join(&self, segment: &str, context: &str) -> Result<Self, DomainError> {
        ensure_safe_segment(segment, context)?;
        Ok(Self(self.0.join(segment)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward slashes regardless of platform, matching archive entry names.
        let parts: Vec<_> = self.0.iter().map(|p| p.to_string_lossy()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// Reject anything that is not a single plain name.
pub fn ensure_safe_segment(segment: &str, context: &str) -> Result<(), DomainError> {
    let unsafe_segment = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0'])
        || segment.contains(':');

    if unsafe_segment {
        return Err(DomainError::UnsafePathSegment {
            segment: segment.to_string(),
            context: context.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_components() {
        assert!(RelativePath::try_new("../escape").is_err());
        assert!(RelativePath::try_new("a/../../b").is_err());
    }

    #[test]
    fn rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn join_checks_segment() {
        let base = RelativePath::try_new("src/main/java").unwrap();
        assert!(base.join("Foo.java", "class").is_ok());
        assert!(base.join("../Foo.java", "class").is_err());
        assert!(base.join("", "class").is_err());
    }

    #[test]
    fn display_uses_forward_slashes() {
        let path = RelativePath::try_new("src")
            .unwrap()
            .join("main", "dir")
            .unwrap();
        assert_eq!(path.to_string(), "src/main");
    }
}
