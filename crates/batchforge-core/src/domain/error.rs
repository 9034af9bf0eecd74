// ============================================================================
// domain/error.rs - BATCH DESCRIPTION ERRORS
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

/// Fields every batch description must carry, in report order.
pub const REQUIRED_FIELDS: [&str; 5] = ["groupId", "artifactId", "pkg", "version", "steps"];

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are cheap data, no I/O handles)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed batch description: {reason}")]
    MalformedSpec { reason: String },

    #[error("Step '{step}' is missing its {field} record")]
    IncompleteStep { step: String, field: &'static str },

    #[error("Invalid package name '{pkg}': {reason}")]
    InvalidPackage { pkg: String, reason: String },

    #[error("Unsafe path segment '{segment}' in {context}")]
    UnsafePathSegment { segment: String, context: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Lookup Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown template identifier: {0}")]
    UnknownTemplate(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(e) => vec![
                format!("Add the missing fields: {}", e.missing().join(", ")),
                "Required: groupId, artifactId, pkg, version and a non-empty steps list".into(),
            ],
            Self::MalformedSpec { reason } => vec![
                format!("Details: {}", reason),
                "Step types are STEP or TASKLET; record types are record or class".into(),
            ],
            Self::IncompleteStep { step, field } => vec![
                format!("Give step '{}' an {} record or make it a TASKLET", step, field),
            ],
            Self::InvalidPackage { .. } => vec![
                "Use a dotted Java package such as com.example.batch".into(),
            ],
            Self::UnsafePathSegment { .. } | Self::AbsolutePathNotAllowed { .. } => vec![
                "Names must be plain identifiers without path separators or '..'".into(),
            ],
            Self::UnknownTemplate(_) => vec!["Try: batchforge templates list".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownTemplate(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}

/// One or more required fields were absent or empty.
///
/// Always carries the complete list, never just the first miss.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }

    /// Missing field names in `REQUIRED_FIELDS` order.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Presence map for every required field, `false` for the missing ones.
    pub fn received(&self) -> BTreeMap<&'static str, bool> {
        REQUIRED_FIELDS
            .iter()
            .map(|field| (*field, !self.missing.contains(field)))
            .collect()
    }
}
