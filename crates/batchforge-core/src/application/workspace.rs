//! Per-request working directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::domain::IsolationKey;
use crate::error::ForgeResult;

/// Scoped owner of one request's isolated working tree.
///
/// The directory is created on [`Workspace::acquire`] and removed when the
/// guard drops, whatever happened in between. Removal is best effort: a
/// failure is logged and swallowed. Archives are written elsewhere and are
/// never touched by this guard.
pub struct Workspace<'fs> {
    filesystem: &'fs dyn Filesystem,
    root: PathBuf,
}

impl<'fs> Workspace<'fs> {
    pub fn acquire(
        filesystem: &'fs dyn Filesystem,
        base: &Path,
        key: &IsolationKey,
    ) -> ForgeResult<Self> {
        let root = base.join(key.as_str());
        if filesystem.exists(&root) {
            return Err(ApplicationError::WorkspaceCollision { path: root }.into());
        }
        filesystem.create_dir_all(&root)?;
        debug!(path = %root.display(), "Workspace acquired");

        Ok(Self { filesystem, root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for Workspace<'_> {
    fn drop(&mut self) {
        match self.filesystem.remove_dir_all(&self.root) {
            Ok(()) => debug!(path = %self.root.display(), "Workspace released"),
            Err(e) => warn!(
                error = %e,
                path = %self.root.display(),
                "Workspace cleanup failed"
            ),
        }
    }
}
