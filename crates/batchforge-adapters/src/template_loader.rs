//! Filesystem template overrides.
//!
//! An override directory holds replacement template files named exactly like
//! the built-ins (`StepSteplet.java.hbs`, `IORecord.java.hbs`, ...). Only the
//! top level is scanned.
//!
//! ```text
//! overrides/
//! ├── StepSteplet.java.hbs   ← replaces `step-class`
//! ├── IOClass.java.hbs       ← replaces `class-io`
//! └── notes.txt              ← ignored with a warning
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use batchforge_core::{
    application::ports::{TemplateOrigin, TemplateSource},
    domain::TemplateId,
    error::{BatchforgeError, ForgeResult},
};

/// Loads override templates from one directory.
///
/// Files whose name matches no built-in template are skipped with a `WARN`
/// log; they do not prevent the others from loading. An unreadable template
/// file is an error, since silently falling back to the built-in would hide
/// the user's edit.
pub struct TemplateOverrides {
    dir: PathBuf,
}

impl TemplateOverrides {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every recognised override, in file-name order.
    ///
    /// # Errors
    ///
    /// Returns [`BatchforgeError::Configuration`] if the directory is missing
    /// or a matching file cannot be read.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load(&self) -> ForgeResult<Vec<TemplateSource>> {
        if !self.dir.is_dir() {
            return Err(config_error(format!(
                "template override directory not found: {}",
                self.dir.display()
            )));
        }

        let mut sources = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                config_error(format!("failed to read template override directory: {e}"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let Some(id) = TemplateId::from_file_name(&name) else {
                warn!(file = %name, "ignoring file that matches no template");
                continue;
            };

            let path = entry.into_path();
            let text = fs::read_to_string(&path).map_err(|e| {
                config_error(format!("failed to read '{}': {e}", path.display()))
            })?;
            debug!(template = %id, path = %path.display(), "loaded override");

            sources.push(TemplateSource {
                id,
                origin: TemplateOrigin::Override(path),
                text,
            });
        }

        debug!(count = sources.len(), "finished loading overrides");
        Ok(sources)
    }
}

fn config_error(message: String) -> BatchforgeError {
    BatchforgeError::Configuration { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let loader = TemplateOverrides::new("/absolutely/does/not/exist");
        assert!(matches!(
            loader.load(),
            Err(BatchforgeError::Configuration { .. })
        ));
    }

    #[test]
    fn loads_matching_files_and_skips_the_rest() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Tasklet.java.hbs"), "custom {{name}}").unwrap();
        fs::write(temp.path().join("IOClass.java.hbs"), "class {{className}}").unwrap();
        fs::write(temp.path().join("README.md"), "notes").unwrap();

        let sources = TemplateOverrides::new(temp.path()).load().unwrap();
        let ids: Vec<_> = sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![TemplateId::ClassIo, TemplateId::TaskletClass]);
        assert_eq!(sources[1].text, "custom {{name}}");
        assert!(matches!(sources[1].origin, TemplateOrigin::Override(_)));
    }

    #[test]
    fn nested_directories_are_not_scanned() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("old");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("Tasklet.java.hbs"), "stale").unwrap();

        let sources = TemplateOverrides::new(temp.path()).load().unwrap();
        assert!(sources.is_empty());
    }
}
