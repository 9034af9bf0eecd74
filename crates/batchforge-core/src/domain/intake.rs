//! Request intake: untyped payload in, typed [`BatchSpec`] out.

use serde_json::Value;

use crate::domain::entities::batch::BatchSpec;
use crate::domain::error::{DomainError, REQUIRED_FIELDS, ValidationError};

/// Validates request payloads of the shape `{ "batch": { ... } }`.
///
/// Every required field is checked before failing, so the caller can report
/// all problems at once. No defaults are applied here.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecificationIntake;

impl SpecificationIntake {
    pub fn accept(payload: &Value) -> Result<BatchSpec, DomainError> {
        let Some(root) = payload.as_object() else {
            return Err(DomainError::MalformedSpec {
                reason: "request body must be a JSON object".into(),
            });
        };

        // No envelope at all reads as "nothing was sent".
        let batch = match root.get("batch") {
            None | Some(Value::Null) => {
                return Err(ValidationError::new(REQUIRED_FIELDS.to_vec()).into());
            }
            Some(batch) => batch,
        };
        let Some(fields) = batch.as_object() else {
            return Err(DomainError::MalformedSpec {
                reason: "'batch' must be an object".into(),
            });
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| fields.get(*name).is_none_or(is_empty))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::new(missing).into());
        }

        serde_json::from_value(batch.clone()).map_err(|e| DomainError::MalformedSpec {
            reason: e.to_string(),
        })
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
