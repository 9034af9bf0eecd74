//! Archive packaging for assembled projects.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::ports::{ArchiveSummary, ArchiveWriter, Filesystem},
    domain::IsolationKey,
    error::ForgeResult,
};

pub const ARCHIVE_EXTENSION: &str = "zip";

/// Packs an assembled tree into `archive_dir`.
///
/// Archive names are `<artifactId>-<token>.zip`, so concurrent requests for
/// the same artifact never share a file. On failure the partial archive is
/// removed before the error is returned.
pub struct ArchivePackager<'a> {
    archiver: &'a dyn ArchiveWriter,
    filesystem: &'a dyn Filesystem,
    archive_dir: &'a Path,
}

impl<'a> ArchivePackager<'a> {
    pub fn new(
        archiver: &'a dyn ArchiveWriter,
        filesystem: &'a dyn Filesystem,
        archive_dir: &'a Path,
    ) -> Self {
        Self {
            archiver,
            filesystem,
            archive_dir,
        }
    }

    pub fn archive_path(&self, artifact_id: &str, key: &IsolationKey) -> PathBuf {
        self.archive_dir.join(format!(
            "{}-{}.{}",
            artifact_id,
            key.archive_token(),
            ARCHIVE_EXTENSION
        ))
    }

    #[instrument(skip_all, fields(artifact = %artifact_id, tree = %tree_root.display()))]
    pub fn pack(
        &self,
        tree_root: &Path,
        artifact_id: &str,
        key: &IsolationKey,
    ) -> ForgeResult<ArchiveSummary> {
        self.filesystem.create_dir_all(self.archive_dir)?;
        let destination = self.archive_path(artifact_id, key);

        match self.archiver.write_archive(tree_root, &destination) {
            Ok(summary) => {
                info!(
                    archive = %summary.path.display(),
                    entries = summary.entries,
                    bytes = summary.bytes,
                    skipped = summary.skipped,
                    "Archive written"
                );
                Ok(summary)
            }
            Err(e) => {
                self.discard_partial(&destination);
                Err(e)
            }
        }
    }

    fn discard_partial(&self, destination: &Path) {
        if !self.filesystem.exists(destination) {
            return;
        }
        if let Err(e) = self.filesystem.remove_file(destination) {
            warn!(
                error = %e,
                path = %destination.display(),
                "Could not remove partial archive"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockArchiveWriter, MockFilesystem};
    use crate::error::FailureKind;

    fn key() -> IsolationKey {
        IsolationKey::new("demo-1", "1700000000000-ab12cd34").unwrap()
    }

    #[test]
    fn archive_name_uses_artifact_and_token() {
        let archiver = MockArchiveWriter::new();
        let fs = MockFilesystem::new();
        let packager = ArchivePackager::new(&archiver, &fs, Path::new("/out"));
        assert_eq!(
            packager.archive_path("demo", &key()),
            PathBuf::from("/out/demo-1700000000000-ab12cd34.zip")
        );
    }

    #[test]
    fn returns_summary_on_success() {
        let mut archiver = MockArchiveWriter::new();
        archiver.expect_write_archive().times(1).returning(|_, dest| {
            Ok(ArchiveSummary {
                path: dest.to_path_buf(),
                entries: 3,
                bytes: 120,
                skipped: 1,
            })
        });
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_remove_file().never();

        let summary = ArchivePackager::new(&archiver, &fs, Path::new("/out"))
            .pack(Path::new("/ws/demo"), "demo", &key())
            .unwrap();
        assert_eq!(summary.entries, 3);
    }

    #[test]
    fn partial_archive_is_removed_on_failure() {
        let mut archiver = MockArchiveWriter::new();
        archiver.expect_write_archive().returning(|_, dest| {
            Err(ApplicationError::PackagingFailed {
                path: dest.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(true);
        fs.expect_remove_file()
            .withf(|p| p.ends_with("demo-1700000000000-ab12cd34.zip"))
            .times(1)
            .returning(|_| Ok(()));

        let err = ArchivePackager::new(&archiver, &fs, Path::new("/out"))
            .pack(Path::new("/ws/demo"), "demo", &key())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Packaging);
    }
}
