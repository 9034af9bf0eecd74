//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `batchforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ScaffoldGenerator`: External archetype generator
//!   - `TemplateRenderer`: Template rendering
//!   - `Filesystem`: File operations
//!   - `ArchiveWriter`: Directory compression
//!   - `IsolationKeyStrategy`: Per-request working directory names
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArchiveSummary, ArchiveWriter, Filesystem, IsolationKeyStrategy, ScaffoldGenerator,
    TemplateOrigin, TemplateRenderer, TemplateSource,
};

#[cfg(test)]
pub use output::{
    MockArchiveWriter, MockFilesystem, MockIsolationKeyStrategy, MockScaffoldGenerator,
    MockTemplateRenderer,
};
