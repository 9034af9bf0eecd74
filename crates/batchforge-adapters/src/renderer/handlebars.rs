//! Handlebars-backed template renderer.

use std::collections::BTreeMap;
use std::path::Path;

use handlebars::Handlebars;
use serde_json::Value;
use tracing::{debug, instrument};

use batchforge_core::{
    application::{
        ApplicationError,
        ports::{TemplateRenderer, TemplateSource},
    },
    domain::TemplateId,
    error::ForgeResult,
};

use super::helpers;
use crate::builtin_templates::builtin_sources;
use crate::template_loader::TemplateOverrides;

/// Renders Java sources from the built-in templates, optionally replaced
/// file-by-file from an override directory.
///
/// Output is never HTML-escaped: generics like `List<String>` and string
/// literals must survive verbatim. Missing optional context fields render as
/// empty text.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    sources: BTreeMap<TemplateId, TemplateSource>,
}

impl HandlebarsRenderer {
    /// Renderer over the embedded templates only.
    pub fn builtin() -> ForgeResult<Self> {
        Self::from_sources(builtin_sources())
    }

    /// Renderer whose templates are replaced by any matching file in `dir`.
    pub fn with_overrides(dir: &Path) -> ForgeResult<Self> {
        let mut sources = builtin_sources();
        for source in TemplateOverrides::new(dir).load()? {
            debug!(template = %source.id, origin = %source.origin, "Template overridden");
            sources.insert(source.id, source);
        }
        Self::from_sources(sources)
    }

    /// Compile every source up front so a broken template fails at startup.
    pub fn from_sources(sources: BTreeMap<TemplateId, TemplateSource>) -> ForgeResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);

        for (id, source) in &sources {
            registry
                .register_template_string(id.as_str(), &source.text)
                .map_err(|e| ApplicationError::RenderingFailed {
                    template: *id,
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { registry, sources })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip(self, context), fields(template = %template))]
    fn render(&self, template: TemplateId, context: &Value) -> ForgeResult<String> {
        if !self.registry.has_template(template.as_str()) {
            return Err(ApplicationError::TemplateMissing { template }.into());
        }
        self.registry
            .render(template.as_str(), context)
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    template,
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn source(&self, template: TemplateId) -> ForgeResult<TemplateSource> {
        self.sources
            .get(&template)
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateMissing { template }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchforge_core::application::ports::TemplateOrigin;
    use batchforge_core::domain::mapper::derive_mapper_context;
    use batchforge_core::domain::{ProcessorSpec, StepSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn step_context() -> Value {
        json!({
            "package": "com.acme.batch",
            "name": "ImportCustomers",
            "type": "STEP",
            "chunkSize": 50,
            "input": { "className": "CustomerRow", "fields": [
                { "name": "id", "type": "Long" },
                { "name": "email", "type": "String" }
            ]},
            "output": { "className": "Customer" },
            "reader": { "type": "JdbcPagingItemReader", "mapperClass": "CustomerRowMapper" },
            "processor": { "type": "MapStructItemProcessor" },
            "writer": { "type": "JdbcBatchItemWriter" }
        })
    }

    #[test]
    fn same_input_renders_identically() {
        let renderer = HandlebarsRenderer::builtin().unwrap();
        let ctx = step_context();
        let first = renderer.render(TemplateId::StepClass, &ctx).unwrap();
        let second = renderer.render(TemplateId::StepClass, &ctx).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("package com.acme.batch;"));
        assert!(first.contains("ImportCustomers"));
    }

    #[test]
    fn output_is_not_html_escaped() {
        let renderer = HandlebarsRenderer::builtin().unwrap();
        let out = renderer
            .render(TemplateId::RecordIo, &json!({
                "package": "com.acme.dto",
                "className": "Row",
                "fields": [{ "name": "tags", "type": "List<String>" }]
            }))
            .unwrap();
        assert!(out.contains("List<String> tags"), "{out}");
    }

    #[test]
    fn tasklet_renders_with_minimal_context() {
        let renderer = HandlebarsRenderer::builtin().unwrap();
        let out = renderer
            .render(TemplateId::TaskletClass, &json!({ "package": "com.acme", "name": "Purge" }))
            .unwrap();
        assert!(out.contains("class Purge"), "{out}");
    }

    #[test]
    fn mapper_renders_custom_methods() {
        let step: StepSpec = serde_json::from_value(json!({
            "name": "importCustomers",
            "type": "STEP",
            "input": { "className": "CustomerRow", "fields": [] },
            "output": { "className": "Customer", "fields": [] },
            "processor": {
                "type": "MapStructItemProcessor",
                "mappings": [
                    { "sourceField": "mail", "targetField": "email",
                      "customMethodName": "lowercase", "sourceType": "String", "targetType": "String" },
                    { "sourceField": "born", "targetField": "birthDate", "dateFormat": "yyyy-MM-dd" }
                ]
            }
        }))
        .unwrap();
        let processor: &ProcessorSpec = step.processor.as_ref().unwrap();
        let ctx = derive_mapper_context("com.acme", &step, processor);
        let value = serde_json::to_value(&ctx).unwrap();

        let out = HandlebarsRenderer::builtin()
            .unwrap()
            .render(TemplateId::ObjectMapper, &value)
            .unwrap();
        assert!(out.contains("interface ImportCustomersMapper"), "{out}");
        assert!(out.contains("toLowerCase()"), "{out}");
        assert!(out.contains("yyyy-MM-dd"), "{out}");
    }

    #[test]
    fn mapper_qualifiers_match_named_methods() {
        let step: StepSpec = serde_json::from_value(json!({
            "name": "importCustomers",
            "type": "STEP",
            "input": { "className": "CustomerRow", "fields": [] },
            "output": { "className": "Customer", "fields": [] },
            "processor": {
                "type": "MapStructItemProcessor",
                "mappings": [
                    { "sourceField": "a", "targetField": "a", "customMethodName": " trim" },
                    { "sourceField": "b", "targetField": "b", "customMethodName": "upper-case" },
                    { "sourceField": "c", "targetField": "c", "customMethodName": "upperCase" }
                ]
            }
        }))
        .unwrap();
        let processor: &ProcessorSpec = step.processor.as_ref().unwrap();
        let value = serde_json::to_value(derive_mapper_context("com.acme", &step, processor)).unwrap();

        let out = HandlebarsRenderer::builtin()
            .unwrap()
            .render(TemplateId::ObjectMapper, &value)
            .unwrap();
        assert!(out.contains(r#"qualifiedByName = "trim")"#), "{out}");
        assert!(out.contains(r#"@Named("trim")"#), "{out}");
        assert!(!out.contains(r#"" trim""#), "{out}");
        assert!(out.contains("String upperCase(String value)"), "{out}");
        assert!(out.contains("String upperCase2(String value)"), "{out}");
    }

    #[test]
    fn row_mapper_uses_planned_class_name() {
        let renderer = HandlebarsRenderer::builtin().unwrap();
        let out = renderer
            .render(TemplateId::ClassRowMapper, &json!({
                "package": "com.acme",
                "mapperClass": "CustomerRowMapper",
                "input": { "className": "CustomerRow", "fields": [] },
                "reader": { "mapperClass": " CustomerRowMapper " }
            }))
            .unwrap();
        assert!(out.contains("public class CustomerRowMapper implements"), "{out}");
    }

    #[test]
    fn broken_source_fails_at_construction() {
        let mut sources = builtin_sources();
        sources.insert(
            TemplateId::TaskletClass,
            TemplateSource {
                id: TemplateId::TaskletClass,
                origin: TemplateOrigin::Override("/tmp/Tasklet.java.hbs".into()),
                text: "{{#if}}".into(),
            },
        );
        assert!(HandlebarsRenderer::from_sources(sources).is_err());
    }

    #[test]
    fn unregistered_template_is_reported() {
        let mut sources = builtin_sources();
        sources.remove(&TemplateId::ClassIo);
        let renderer = HandlebarsRenderer::from_sources(sources).unwrap();
        let err = renderer.render(TemplateId::ClassIo, &json!({})).unwrap_err();
        assert!(err.to_string().contains("class-io"));
        assert!(renderer.source(TemplateId::ClassIo).is_err());
    }
}
