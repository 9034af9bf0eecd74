//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project archive".

pub mod assembler;
pub mod generation_service;
pub mod packager;
pub mod template_service;

pub use assembler::{AssembledProject, ProjectAssembler};
pub use generation_service::{
    GeneratedArchive, GenerationPorts, GenerationService, GenerationSettings,
};
pub use packager::ArchivePackager;
pub use template_service::{TemplateInfo, TemplateService};
