//! Unified error handling for Batchforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Batchforge Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BatchforgeError {
    /// Errors from the domain layer (the request itself is wrong).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Which stage of a request failed, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request was incomplete or malformed. Nothing was written.
    Validation,
    /// Scaffolding, rendering or writing the tree failed.
    Generation,
    /// Building the archive failed.
    Packaging,
}

impl BatchforgeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Validation,
            Self::Application(ApplicationError::PackagingFailed { .. }) => FailureKind::Packaging,
            Self::Application(_) | Self::Configuration { .. } => FailureKind::Generation,
        }
    }

    /// Message safe to show to a remote caller.
    ///
    /// Validation errors are returned in full; anything else is reduced to a
    /// generic line that carries no paths or command output.
    pub fn public_message(&self) -> String {
        match self.kind() {
            FailureKind::Validation => self.to_string(),
            FailureKind::Generation => "Project generation failed".to_string(),
            FailureKind::Packaging => "Archive packaging failed".to_string(),
        }
    }

    /// Missing required fields, when this is a validation error.
    pub fn missing_fields(&self) -> Option<&[&'static str]> {
        match self {
            Self::Domain(DomainError::Validation(v)) => Some(v.missing()),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Try: batchforge config list".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// A collaborator outside this process failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, BatchforgeError>;
