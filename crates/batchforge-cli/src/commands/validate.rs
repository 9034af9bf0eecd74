//! `batchforge validate` - check a request without side effects.

use serde::Serialize;
use serde_json::Value;

use batchforge_core::domain::{GenerationPlan, PlannedFile, SpecificationIntake, TemplateId};

use crate::{
    cli::ValidateArgs,
    commands::read_request,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct StepSummary {
    name: String,
    kind: String,
    files: usize,
    /// Custom mapping methods emitted as stubs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    manual_methods: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    artifact_id: String,
    package: String,
    steps: Vec<StepSummary>,
}

pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let payload = read_request(&args.request)?;
    let spec = SpecificationIntake::accept(&payload)?;
    // Planning catches unresolvable templates and bad package names too.
    let plan = GenerationPlan::for_batch(&spec)?;

    let report = ValidationReport {
        valid: true,
        artifact_id: spec.artifact_id.clone(),
        package: spec.pkg.clone(),
        steps: spec
            .steps
            .iter()
            .map(|s| StepSummary {
                name: s.name.clone(),
                kind: s.kind.to_string(),
                files: plan.files_for_step(&s.name).count(),
                manual_methods: plan
                    .files_for_step(&s.name)
                    .flat_map(stub_methods)
                    .collect(),
            })
            .collect(),
    };

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&format!(
        "Request is valid: {} ({} step(s), {} file(s) to generate)",
        report.artifact_id,
        report.steps.len(),
        plan.len()
    ))?;
    for step in &report.steps {
        output.print(&format!("  {} [{}]: {} file(s)", step.name, step.kind, step.files))?;
        if !step.manual_methods.is_empty() {
            output.warning(&format!(
                "  {}: mapper needs manual completion for {}",
                step.name,
                step.manual_methods.join(", ")
            ))?;
        }
    }
    Ok(())
}

/// Names of custom methods the object mapper could only stub out.
fn stub_methods(file: &PlannedFile) -> Vec<String> {
    if file.template != TemplateId::ObjectMapper {
        return Vec::new();
    }
    file.context
        .get("customMethods")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|m| m.get("requiresManualCompletion").and_then(Value::as_bool) == Some(true))
        .filter_map(|m| m.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_for(methods: &[&str]) -> GenerationPlan {
        let mappings: Vec<_> = methods
            .iter()
            .map(|m| json!({ "sourceField": "a", "targetField": "b", "customMethodName": m }))
            .collect();
        let spec = SpecificationIntake::accept(&json!({
            "batch": {
                "groupId": "com.acme", "artifactId": "demo", "pkg": "com.acme",
                "version": "1.0.0",
                "steps": [{
                    "name": "load", "type": "STEP",
                    "input": { "className": "In", "fields": [{ "name": "a" }] },
                    "output": { "className": "Out", "fields": [{ "name": "b" }] },
                    "reader": { "type": "JdbcPagingItemReader" },
                    "processor": { "type": "MapStructItemProcessor", "mappings": mappings }
                }]
            }
        }))
        .unwrap();
        GenerationPlan::for_batch(&spec).unwrap()
    }

    #[test]
    fn unknown_custom_method_is_reported() {
        let plan = plan_for(&["frobnicate"]);
        let stubs: Vec<_> = plan.files().iter().flat_map(stub_methods).collect();
        assert_eq!(stubs, vec!["frobnicate".to_string()]);
    }

    #[test]
    fn plain_mappings_need_no_completion() {
        let plan = plan_for(&[]);
        assert!(plan.files().iter().flat_map(stub_methods).next().is_none());
    }
}
