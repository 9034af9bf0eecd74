//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateId;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The external generator ran and failed.
    #[error("Scaffold command '{command}' failed: {reason}")]
    ScaffoldFailed { command: String, reason: String },

    /// The external generator did not finish within its time budget.
    #[error("Scaffold command '{command}' timed out after {timeout_secs}s")]
    ScaffoldTimedOut { command: String, timeout_secs: u64 },

    /// No template registered for an identifier.
    #[error("Template '{template}' is not registered")]
    TemplateMissing { template: TemplateId },

    /// Template rendering failed.
    #[error("Rendering '{template}' failed: {reason}")]
    RenderingFailed { template: TemplateId, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Archive creation failed.
    #[error("Packaging {path} failed: {reason}")]
    PackagingFailed { path: PathBuf, reason: String },

    /// The isolated working directory already exists.
    #[error("Working directory already exists: {path}")]
    WorkspaceCollision { path: PathBuf },

    /// Shared adapter state was poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ScaffoldFailed { command, .. } => vec![
                format!("Check that '{}' is installed and on PATH", command),
                "Check that the archetype is available in your Maven repository".into(),
                "Try: batchforge doctor".into(),
            ],
            Self::ScaffoldTimedOut { .. } => vec![
                "Raise scaffold.timeout_secs in the configuration".into(),
                "A first run may be downloading dependencies; try again".into(),
            ],
            Self::TemplateMissing { .. } => vec![
                "Try: batchforge templates list".into(),
                "Check templates.override_dir in the configuration".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Inspect the template with: batchforge templates show {}", template),
                "Check that the step provides every field the template uses".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PackagingFailed { .. } => vec![
                "Check free disk space in the archive directory".into(),
            ],
            Self::WorkspaceCollision { .. } => vec![
                "Retry the request; a fresh working directory will be chosen".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::ScaffoldFailed { .. } | Self::ScaffoldTimedOut { .. } => ErrorCategory::External,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::PackagingFailed { .. }
            | Self::WorkspaceCollision { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
