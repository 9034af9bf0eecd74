//! Typed batch description, as received from front-ends.
//!
//! Field names follow the JSON wire format (camelCase). Several fields accept
//! an alias because front-ends in the wild send either spelling.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{
    ProcessorKind, ProjectCoordinates, ReaderKind, RecordShape, StepKind,
};

/// A full batch project description.
///
/// Identity is `artifact_id` for the lifetime of one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSpec {
    pub group_id: String,
    pub artifact_id: String,
    pub pkg: String,
    pub version: String,
    /// Configuration document written verbatim into the project resources.
    #[serde(default, alias = "generatedYaml")]
    pub generated_config: Option<String>,
    pub steps: Vec<StepSpec>,
}

impl BatchSpec {
    pub fn coordinates(&self) -> ProjectCoordinates {
        ProjectCoordinates {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            package: self.pkg.clone(),
        }
    }

    /// Configuration text, empty when the request carried none.
    pub fn config_text(&self) -> &str {
        self.generated_config.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSpec {
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<RecordSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<RecordSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader: Option<ReaderSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<ProcessorSpec>,
    /// Writer settings and anything else the templates may reference.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSpec {
    pub class_name: String,
    #[serde(rename = "recordType", alias = "shape", default)]
    pub shape: RecordShape,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
}

fn default_field_type() -> String {
    "String".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderSpec {
    #[serde(rename = "type", alias = "kind")]
    pub kind: ReaderKind,
    #[serde(
        rename = "mapperClass",
        alias = "rowMapperClass",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub row_mapper_class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReaderSpec {
    /// Row-mapper class name, if one is configured and non-blank.
    pub fn row_mapper(&self) -> Option<&str> {
        self.row_mapper_class
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorSpec {
    #[serde(rename = "type", alias = "kind")]
    pub kind: ProcessorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub mappings: Vec<MappingRule>,
    /// Left unresolved here; see [`ProcessorSpec::bulk_mapping_enabled`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_bulk_mapping: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessorSpec {
    /// Only an explicit `false` disables bulk mapping.
    pub fn bulk_mapping_enabled(&self) -> bool {
        !matches!(self.enable_bulk_mapping, Some(false))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub source_field: String,
    pub target_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_method_name: Option<String>,
}
