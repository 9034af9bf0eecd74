//! Delayed deletion of delivered archives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_secs(5);

/// Schedules archive removal some time after the caller has delivered it.
///
/// Each schedule runs on its own thread and logs its own failure; nothing is
/// reported back to the request that produced the archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveJanitor {
    delay: Duration,
}

impl ArchiveJanitor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&self, archive: impl Into<PathBuf>) -> ScheduledCleanup {
        let path = archive.into();
        let delay = self.delay;
        debug!(path = %path.display(), ?delay, "Archive cleanup scheduled");

        let handle = thread::spawn({
            let path = path.clone();
            move || {
                thread::sleep(delay);
                remove_archive(&path)
            }
        });

        ScheduledCleanup { path, handle }
    }
}

impl Default for ArchiveJanitor {
    fn default() -> Self {
        Self::new(DEFAULT_CLEANUP_DELAY)
    }
}

/// Handle to one pending removal.
///
/// Dropping it detaches the task; the removal still happens unless the
/// process exits first.
#[derive(Debug)]
pub struct ScheduledCleanup {
    path: PathBuf,
    handle: JoinHandle<bool>,
}

impl ScheduledCleanup {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the removal ran. Returns whether the archive is gone.
    pub fn wait(self) -> bool {
        self.handle.join().unwrap_or(false)
    }
}

fn remove_archive(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Archive removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Archive cleanup failed");
            false
        }
    }
}
