//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `batchforge-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{IsolationKey, ProjectCoordinates, TemplateId};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `batchforge_adapters::filesystem::LocalFilesystem` (production)
/// - `batchforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for the external project generator.
///
/// Implemented by:
/// - `batchforge_adapters::scaffold::MavenArchetypeGenerator`
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldGenerator: Send + Sync {
    /// Materialize a base project under `parent` and return its root.
    ///
    /// Blocks until the generator exits or its time budget runs out.
    fn generate(&self, coordinates: &ProjectCoordinates, parent: &Path) -> ForgeResult<PathBuf>;
}

/// Where a template's text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Override(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("builtin"),
            Self::Override(path) => write!(f, "override ({})", path.display()),
        }
    }
}

/// Raw template text as registered with a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub id: TemplateId,
    pub origin: TemplateOrigin,
    pub text: String,
}

/// Port for template rendering.
///
/// Implemented by:
/// - `batchforge_adapters::renderer::HandlebarsRenderer`
///
/// Rendering must be a pure function of template and context.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: TemplateId, context: &Value) -> ForgeResult<String>;

    /// Template text for inspection.
    fn source(&self, template: TemplateId) -> ForgeResult<TemplateSource>;
}

/// Outcome of writing an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// File entries written.
    pub entries: usize,
    /// Size of the finished archive on disk.
    pub bytes: u64,
    /// Paths left out because they are build output.
    pub skipped: usize,
}

/// Port for packaging a directory tree into one compressed file.
///
/// Implemented by:
/// - `batchforge_adapters::archive::ZipArchiveWriter`
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveWriter: Send + Sync {
    /// Returns only after `destination` is fully written and closed.
    fn write_archive(&self, source: &Path, destination: &Path) -> ForgeResult<ArchiveSummary>;
}

/// Port for naming per-request working directories.
///
/// Implemented by:
/// - `batchforge_adapters::isolation::RequestIsolationKeys`
#[cfg_attr(test, mockall::automock)]
pub trait IsolationKeyStrategy: Send + Sync {
    /// A key no other in-flight request can receive.
    fn next_key(&self, artifact_id: &str) -> ForgeResult<IsolationKey>;
}
