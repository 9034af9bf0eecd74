pub mod batch;
pub mod common;
pub mod plan;

pub use crate::domain::DomainError;
pub use batch::{BatchSpec, FieldSpec, MappingRule, ProcessorSpec, ReaderSpec, RecordSpec, StepSpec};
pub use plan::{GenerationPlan, PlannedFile};
