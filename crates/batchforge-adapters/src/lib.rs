//! Infrastructure adapters for Batchforge.
//!
//! This crate implements the ports defined in `batchforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod builtin_templates;
pub mod filesystem;
pub mod isolation;
pub mod janitor;
pub mod renderer;
pub mod scaffold;
pub mod template_loader;

// Re-export commonly used adapters
pub use archive::ZipArchiveWriter;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use isolation::RequestIsolationKeys;
pub use janitor::{ArchiveJanitor, ScheduledCleanup};
pub use renderer::HandlebarsRenderer;
pub use scaffold::{MavenArchetypeGenerator, ScaffoldSettings};
pub use template_loader::TemplateOverrides;
