// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Batchforge.
//!
//! Pure generation logic: intake of batch descriptions, template resolution,
//! object-mapper derivation and file planning. Rendering, process execution
//! and filesystem access are handled via ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few external crates**: std + thiserror + serde for the wire model
//! - **Immutable entities**: Request-local, read-only during generation
//!
// Public API - what the world sees
pub mod dispatch;
pub mod entities;
pub mod error;
pub mod intake;
pub mod mapper;
pub mod value_objects;

// Re-exports for convenience
pub use dispatch::{ArtifactRole, resolve_template, row_mapper_for};
pub use entities::{
    batch::{BatchSpec, FieldSpec, MappingRule, ProcessorSpec, ReaderSpec, RecordSpec, StepSpec},
    common::RelativePath,
    plan::{GenerationPlan, PlannedFile},
};
pub use error::{DomainError, ErrorCategory, REQUIRED_FIELDS, ValidationError};
pub use intake::SpecificationIntake;
pub use mapper::{CustomMethod, MapperContext, derive_mapper_context};
pub use value_objects::{
    IsolationKey, ProcessorKind, ProjectCoordinates, ReaderKind, RecordShape, StepKind, TemplateId,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn template_id_parses_names_and_file_names() {
        assert_eq!(TemplateId::from_str("step-class").unwrap(), TemplateId::StepClass);
        assert_eq!(TemplateId::from_str("OBJECT-MAPPER").unwrap(), TemplateId::ObjectMapper);
        assert_eq!(
            TemplateId::from_str("RowMapperClass.java.hbs").unwrap(),
            TemplateId::ClassRowMapper
        );
        assert!(matches!(
            TemplateId::from_str("writer"),
            Err(DomainError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn template_ids_have_distinct_files() {
        let mut files: Vec<_> = TemplateId::ALL.iter().map(|t| t.file_name()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), TemplateId::ALL.len());
        for id in TemplateId::ALL {
            assert_eq!(TemplateId::from_file_name(id.file_name()), Some(id));
        }
    }

    #[test]
    fn kinds_round_trip_their_wire_names() {
        assert_eq!(serde_json::to_value(StepKind::Tasklet).unwrap(), json!("TASKLET"));
        assert_eq!(serde_json::to_value(RecordShape::Record).unwrap(), json!("record"));
        assert_eq!(
            serde_json::from_value::<ReaderKind>(json!("JdbcCursorItemReader")).unwrap(),
            ReaderKind::Other("JdbcCursorItemReader".into())
        );
        assert_eq!(
            serde_json::to_value(ProcessorKind::StructMapper).unwrap(),
            json!("MapStructItemProcessor")
        );
    }

    #[test]
    fn isolation_key_must_be_a_single_segment() {
        assert!(IsolationKey::new("demo-20260101-abc", "1700000000000-abcd").is_ok());
        assert!(IsolationKey::new("../demo", "t").is_err());
        assert!(IsolationKey::new("demo", "a/b").is_err());
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn validation_error_lists_all_fields() {
        let err = DomainError::from(ValidationError::new(vec!["version", "steps"]));
        assert_eq!(err.to_string(), "Missing required fields: version, steps");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions()[0].contains("version, steps"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        assert_eq!(
            DomainError::UnknownTemplate("x".into()).category(),
            ErrorCategory::NotFound
        );
    }

    // ========================================================================
    // Pipeline Tests (intake → plan)
    // ========================================================================

    #[test]
    fn intake_then_plan() {
        let spec = SpecificationIntake::accept(&json!({
            "batch": {
                "groupId": "com.acme", "artifactId": "a", "pkg": "com.acme",
                "version": "1", "steps": [{ "name": "t", "type": "TASKLET" }]
            }
        }))
        .unwrap();
        let plan = GenerationPlan::for_batch(&spec).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(
            plan.files()[0].path.to_string(),
            "src/main/java/com/acme/step/t.java"
        );
    }
}
