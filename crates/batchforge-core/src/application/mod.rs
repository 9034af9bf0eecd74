//! Application layer for Batchforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, ProjectAssembler,
//!   ArchivePackager, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Workspace**: The per-request working directory guard
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod workspace;

// Re-export main services
pub use services::{
    ArchivePackager, AssembledProject, GeneratedArchive, GenerationPorts, GenerationService,
    GenerationSettings, ProjectAssembler, TemplateInfo, TemplateService,
};
pub use workspace::Workspace;

// Re-export port traits (for adapter implementation)
pub use ports::{
    ArchiveSummary, ArchiveWriter, Filesystem, IsolationKeyStrategy, ScaffoldGenerator,
    TemplateOrigin, TemplateRenderer, TemplateSource,
};

pub use error::ApplicationError;
