//! Batchforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Batchforge
//! batch project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         batchforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, ProjectAssembler,   │
//! │  ArchivePackager, Workspace)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Scaffold, Render, Filesystem, Archive) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   batchforge-adapters (Infrastructure)  │
//! │ (Handlebars, LocalFilesystem, Zip, mvn) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (BatchSpec, intake, mapper derivation,  │
//! │  template dispatch, GenerationPlan)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use batchforge_core::application::{GenerationPorts, GenerationService, GenerationSettings};
//!
//! let service = GenerationService::new(ports, GenerationSettings::new("/tmp/batchforge"));
//! let archive = service.generate(&request_json)?;
//! println!("archive written to {}", archive.path.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArchivePackager, GeneratedArchive, GenerationPorts, GenerationService,
        GenerationSettings, ProjectAssembler, TemplateInfo, TemplateService, Workspace,
        ports::{
            ArchiveSummary, ArchiveWriter, Filesystem, IsolationKeyStrategy, ScaffoldGenerator,
            TemplateOrigin, TemplateRenderer, TemplateSource,
        },
    };
    pub use crate::domain::{
        BatchSpec, GenerationPlan, IsolationKey, MappingRule, ProcessorSpec, ProjectCoordinates,
        ReaderSpec, RecordSpec, SpecificationIntake, StepSpec, TemplateId,
    };
    pub use crate::error::{BatchforgeError, FailureKind, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
