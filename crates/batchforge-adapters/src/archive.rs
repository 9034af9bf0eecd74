//! Zip archive writer.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path};

use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use batchforge_core::{
    application::{
        ApplicationError,
        ports::{ArchiveSummary, ArchiveWriter},
    },
    error::{BatchforgeError, ForgeResult},
};

/// Build output left out of every archive unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 1] = ["target"];

/// Maximum Deflate level.
const COMPRESSION_LEVEL: i64 = 9;

/// Packs a directory tree into a Deflate-compressed zip.
///
/// Only directories sitting directly under the source root whose name equals
/// one of `exclude_dirs` are skipped, so `target/` is left out while
/// `target-data/` or `src/main/target/` are kept.
#[derive(Debug, Clone)]
pub struct ZipArchiveWriter {
    exclude_dirs: Vec<String>,
}

impl ZipArchiveWriter {
    pub fn new(exclude_dirs: Vec<String>) -> Self {
        Self { exclude_dirs }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() == 1
            && entry.file_type().is_dir()
            && self
                .exclude_dirs
                .iter()
                .any(|name| entry.file_name() == name.as_str())
    }

    fn write_entries(
        &self,
        source: &Path,
        zip: &mut ZipWriter<File>,
    ) -> io::Result<(usize, usize)> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL));

        let mut files = 0;
        let mut skipped = 0;
        let walker = WalkDir::new(source)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if self.is_excluded(entry) {
                    debug!(path = %entry.path().display(), "Excluded from archive");
                    skipped += 1;
                    false
                } else {
                    true
                }
            });

        for entry in walker {
            let entry = entry.map_err(io::Error::other)?;
            let Some(name) = entry_name(source, entry.path()) else {
                warn!(path = %entry.path().display(), "Skipping entry outside the archive root");
                continue;
            };

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{name}/"), options)
                    .map_err(io::Error::other)?;
            } else if entry.file_type().is_file() {
                zip.start_file(name, options).map_err(io::Error::other)?;
                zip.write_all(&fs::read(entry.path())?)?;
                files += 1;
            } else {
                warn!(path = %entry.path().display(), "Skipping special file");
            }
        }

        Ok((files, skipped))
    }
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect())
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    #[instrument(skip(self), fields(source = %source.display(), destination = %destination.display()))]
    fn write_archive(&self, source: &Path, destination: &Path) -> ForgeResult<ArchiveSummary> {
        if !source.is_dir() {
            return Err(packaging_failed(
                destination,
                format!("source is not a directory: {}", source.display()),
            ));
        }

        let file = File::create(destination).map_err(|e| packaging_failed(destination, e))?;
        let mut zip = ZipWriter::new(file);

        let (entries, skipped) = self
            .write_entries(source, &mut zip)
            .map_err(|e| packaging_failed(destination, e))?;

        // Completion means the central directory is written and the file synced.
        let file = zip
            .finish()
            .map_err(|e| packaging_failed(destination, e))?;
        file.sync_all()
            .map_err(|e| packaging_failed(destination, e))?;

        let bytes = fs::metadata(destination)
            .map_err(|e| packaging_failed(destination, e))?
            .len();

        Ok(ArchiveSummary {
            path: destination.to_path_buf(),
            entries,
            bytes,
            skipped,
        })
    }
}

/// Forward-slash name of `path` relative to `root`.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn packaging_failed(path: &Path, reason: impl ToString) -> BatchforgeError {
    ApplicationError::PackagingFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for (path, content) in [
            ("pom.xml", "<project/>"),
            ("src/main/java/App.java", "class App {}"),
            ("src/main/resources/application.yml", ""),
            ("target/classes/App.class", "binary"),
            ("target-data/seed.csv", "id\n1"),
        ] {
            let full = root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn names(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn excludes_top_level_target_only() {
        let source = tree();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("demo.zip");

        let summary = ZipArchiveWriter::default()
            .write_archive(source.path(), &dest)
            .unwrap();

        let names = names(&dest);
        assert!(names.iter().all(|n| !n.starts_with("target/")), "{names:?}");
        assert!(names.contains(&"target-data/seed.csv".to_string()));
        assert!(names.contains(&"src/main/java/App.java".to_string()));
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.bytes, fs::metadata(&dest).unwrap().len());
    }

    #[test]
    fn entries_are_deflated_and_intact() {
        let source = tree();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("demo.zip");
        ZipArchiveWriter::default()
            .write_archive(source.path(), &dest)
            .unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut entry = archive.by_name("src/main/java/App.java").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "class App {}");
    }

    #[test]
    fn empty_exclusion_list_keeps_everything() {
        let source = tree();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("all.zip");
        let summary = ZipArchiveWriter::new(Vec::new())
            .write_archive(source.path(), &dest)
            .unwrap();
        assert_eq!(summary.entries, 5);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn missing_source_is_a_packaging_failure() {
        let out = TempDir::new().unwrap();
        let err = ZipArchiveWriter::default()
            .write_archive(&out.path().join("nope"), &out.path().join("x.zip"))
            .unwrap_err();
        assert!(matches!(
            err,
            BatchforgeError::Application(ApplicationError::PackagingFailed { .. })
        ));
    }

    #[test]
    fn names_use_forward_slashes() {
        let root = Path::new("/ws/demo");
        assert_eq!(
            entry_name(root, &root.join("src").join("Main.java")).as_deref(),
            Some("src/Main.java")
        );
        assert_eq!(entry_name(root, root), None);
    }
}
