//! Object-mapper derivation.
//!
//! Turns a step's processor mapping rules into the flat context the
//! object-mapper template consumes: which custom helper methods to emit (and
//! their bodies), whether date types need importing, and whether the
//! collection-to-collection method is wanted.

use serde::Serialize;

use crate::domain::entities::batch::{MappingRule, ProcessorSpec, RecordSpec, StepSpec};

/// Java type used when a rule leaves a type unspecified.
pub const DEFAULT_JAVA_TYPE: &str = "String";

/// Simple type-name suffixes that mark a type as date-like.
const DATE_SUFFIXES: [&str; 4] = ["Date", "DateTime", "Instant", "Timestamp"];

/// Identifier used when a method name has no identifier characters at all.
const FALLBACK_METHOD_NAME: &str = "customMapping";

/// One generated helper method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMethod {
    /// Name as referenced by mapping rules.
    pub name: String,
    /// `name` as a Java identifier (`upper-case` becomes `upperCase`).
    pub java_name: String,
    pub return_type: String,
    pub param_type: String,
    /// Java statements for the method body, one per line.
    pub body: Vec<String>,
    pub requires_manual_completion: bool,
}

/// Everything the object-mapper template needs, flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperContext {
    pub package: String,
    pub step_name: String,
    pub mapper_name: String,
    pub input: Option<RecordSpec>,
    pub output: Option<RecordSpec>,
    pub mappings: Vec<MappingRule>,
    pub has_date_mapping: bool,
    pub custom_methods: Vec<CustomMethod>,
    pub has_custom_methods: bool,
    pub enable_bulk_mapping: bool,
    pub requires_manual_completion: bool,
}

/// Class name for a step's object mapper.
pub fn mapper_class_name(step: &StepSpec, processor: &ProcessorSpec) -> String {
    processor
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}Mapper", capitalize_first(&step.name)))
}

pub fn derive_mapper_context(
    package: &str,
    step: &StepSpec,
    processor: &ProcessorSpec,
) -> MapperContext {
    let custom_methods = collect_custom_methods(&processor.mappings);
    let requires_manual_completion = custom_methods
        .iter()
        .any(|method| method.requires_manual_completion);

    MapperContext {
        package: package.to_string(),
        step_name: step.name.clone(),
        mapper_name: mapper_class_name(step, processor),
        input: step.input.clone(),
        output: step.output.clone(),
        mappings: processor.mappings.iter().map(normalize_rule).collect(),
        has_date_mapping: has_date_mapping(&processor.mappings),
        has_custom_methods: !custom_methods.is_empty(),
        custom_methods,
        enable_bulk_mapping: processor.bulk_mapping_enabled(),
        requires_manual_completion,
    }
}

/// True iff some rule carries a date format or a date-like type.
pub fn has_date_mapping(rules: &[MappingRule]) -> bool {
    rules.iter().any(|rule| {
        non_blank(rule.date_format.as_deref()).is_some()
            || is_date_like(rule.source_type.as_deref())
            || is_date_like(rule.target_type.as_deref())
    })
}

/// Rule as the template sees it: optional names trimmed, blanks dropped, so
/// `qualifiedByName` always matches a generated `@Named` value.
fn normalize_rule(rule: &MappingRule) -> MappingRule {
    let trimmed = |value: &Option<String>| non_blank(value.as_deref()).map(str::to_string);
    MappingRule {
        source_field: rule.source_field.clone(),
        target_field: rule.target_field.clone(),
        source_type: trimmed(&rule.source_type),
        target_type: trimmed(&rule.target_type),
        date_format: trimmed(&rule.date_format),
        custom_method_name: trimmed(&rule.custom_method_name),
    }
}

/// Distinct custom methods in first-use order, typed from their first rule.
///
/// Distinct names that collapse to the same Java identifier get numeric
/// suffixes so every generated method has its own signature.
pub fn collect_custom_methods(rules: &[MappingRule]) -> Vec<CustomMethod> {
    let mut methods: Vec<CustomMethod> = Vec::new();

    for rule in rules {
        let Some(name) = non_blank(rule.custom_method_name.as_deref()) else {
            continue;
        };
        if methods.iter().any(|m| m.name == name) {
            continue;
        }

        let (body, requires_manual_completion) = method_body(name);
        let java_name = unique_java_name(name, &methods);
        methods.push(CustomMethod {
            name: name.to_string(),
            java_name,
            return_type: java_type(rule.target_type.as_deref()),
            param_type: java_type(rule.source_type.as_deref()),
            body,
            requires_manual_completion,
        });
    }

    methods
}

/// Body for a known helper name, or a placeholder that needs finishing by hand.
fn method_body(name: &str) -> (Vec<String>, bool) {
    let key: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();

    let known = match key.as_str() {
        "lowercase" | "tolowercase" => Some("return value == null ? null : value.toLowerCase();"),
        "uppercase" | "touppercase" => Some("return value == null ? null : value.toUpperCase();"),
        "trim" => Some("return value == null ? null : value.trim();"),
        "capitalize" => Some(
            "return value == null || value.isEmpty() ? value : \
             value.substring(0, 1).toUpperCase() + value.substring(1).toLowerCase();",
        ),
        _ => None,
    };

    match known {
        Some(line) => (vec![line.to_string()], false),
        None => (
            vec![
                format!("// TODO: implement custom mapping method '{name}'"),
                format!(
                    "throw new UnsupportedOperationException(\"{name} is not implemented yet\");"
                ),
            ],
            true,
        ),
    }
}

fn unique_java_name(name: &str, taken: &[CustomMethod]) -> String {
    let mut base = java_identifier(name);
    if base.is_empty() {
        base = FALLBACK_METHOD_NAME.to_string();
    }
    let is_taken = |candidate: &str| taken.iter().any(|m| m.java_name == candidate);
    let mut candidate = base.clone();
    let mut n = 2;
    while is_taken(&candidate) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    candidate
}

fn java_type(declared: Option<&str>) -> String {
    non_blank(declared).unwrap_or(DEFAULT_JAVA_TYPE).to_string()
}

/// Matches on the simple type name: `java.time.LocalDate` and `Instant`
/// qualify, `Candidate` and `UpdateStatus` do not.
fn is_date_like(declared: Option<&str>) -> bool {
    non_blank(declared).is_some_and(|ty| {
        let raw = ty.split('<').next().unwrap_or(ty);
        let simple = raw.rsplit('.').next().unwrap_or(raw).trim();
        DATE_SUFFIXES
            .iter()
            .any(|suffix| simple.ends_with(suffix) || simple.eq_ignore_ascii_case(suffix))
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn java_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '$' {
            if upper_next && !out.is_empty() {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
