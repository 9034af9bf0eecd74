//! Generation Service - main application orchestrator.
//!
//! This service coordinates one generation request end to end:
//! 1. Validate the payload into a `BatchSpec`
//! 2. Plan every file to generate
//! 3. Acquire an isolated workspace
//! 4. Assemble the project inside it
//! 5. Package the project into an archive
//!
//! The workspace is released on every path out of step 3 onwards.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ports::{ArchiveWriter, Filesystem, IsolationKeyStrategy, ScaffoldGenerator, TemplateRenderer},
        services::{ArchivePackager, ProjectAssembler},
        workspace::Workspace,
    },
    domain::{BatchSpec, GenerationPlan, SpecificationIntake},
    error::ForgeResult,
};

/// Adapters the service drives.
pub struct GenerationPorts {
    pub scaffold: Box<dyn ScaffoldGenerator>,
    pub renderer: Box<dyn TemplateRenderer>,
    pub filesystem: Box<dyn Filesystem>,
    pub archiver: Box<dyn ArchiveWriter>,
    pub keys: Box<dyn IsolationKeyStrategy>,
}

/// Where transient trees and finished archives live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub work_root: PathBuf,
    pub archive_dir: PathBuf,
}

impl GenerationSettings {
    /// Archives default to an `archives` directory under `work_root`.
    pub fn new(work_root: impl Into<PathBuf>) -> Self {
        let work_root = work_root.into();
        Self {
            archive_dir: work_root.join("archives"),
            work_root,
        }
    }

    pub fn with_archive_dir(mut self, archive_dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = archive_dir.into();
        self
    }
}

/// A finished archive handed back to the caller.
///
/// The caller owns the file from here on, including its deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArchive {
    pub request_id: Uuid,
    pub path: PathBuf,
    /// Download name: `<artifactId>-<token>.zip`.
    pub file_name: String,
    pub entries: usize,
    pub bytes: u64,
    pub files_generated: usize,
}

/// Main generation service.
pub struct GenerationService {
    ports: GenerationPorts,
    settings: GenerationSettings,
}

impl GenerationService {
    pub fn new(ports: GenerationPorts, settings: GenerationSettings) -> Self {
        Self { ports, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Validate and plan without touching the filesystem.
    pub fn plan(&self, payload: &Value) -> ForgeResult<(BatchSpec, GenerationPlan)> {
        let spec = SpecificationIntake::accept(payload)?;
        let plan = GenerationPlan::for_batch(&spec)?;
        Ok((spec, plan))
    }

    /// Run a full request: payload in, archive out.
    #[instrument(skip_all, fields(request_id = tracing::field::Empty))]
    pub fn generate(&self, payload: &Value) -> ForgeResult<GeneratedArchive> {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));

        let (spec, plan) = self.plan(payload)?;
        info!(
            artifact = %spec.artifact_id,
            steps = spec.steps.len(),
            files = plan.len(),
            "Generating project"
        );
        self.generate_planned(request_id, &spec, &plan)
    }

    fn generate_planned(
        &self,
        request_id: Uuid,
        spec: &BatchSpec,
        plan: &GenerationPlan,
    ) -> ForgeResult<GeneratedArchive> {
        let fs = self.ports.filesystem.as_ref();
        let key = self.ports.keys.next_key(&spec.artifact_id)?;

        // Released on drop, after packaging or on the first error.
        let workspace = Workspace::acquire(fs, &self.settings.work_root, &key)?;

        let project = ProjectAssembler::new(
            self.ports.scaffold.as_ref(),
            self.ports.renderer.as_ref(),
            fs,
        )
        .assemble(spec, plan, workspace.path())?;

        let summary = ArchivePackager::new(
            self.ports.archiver.as_ref(),
            fs,
            &self.settings.archive_dir,
        )
        .pack(&project.root, &spec.artifact_id, &key)?;

        drop(workspace);

        let file_name = file_name_of(&summary.path);
        info!(archive = %file_name, bytes = summary.bytes, "Generation complete");

        Ok(GeneratedArchive {
            request_id,
            path: summary.path,
            file_name,
            entries: summary.entries,
            bytes: summary.bytes,
            files_generated: project.files_written,
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
