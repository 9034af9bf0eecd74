//! Template Service - template catalogue queries.
//!
//! Lists the templates the generator uses and where each one is loaded from.
//! Separated from GenerationService for single responsibility.

use crate::{
    application::ports::{TemplateOrigin, TemplateRenderer, TemplateSource},
    domain::TemplateId,
    error::ForgeResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub file_name: &'static str,
    pub origin: TemplateOrigin,
    pub description: &'static str,
}

/// Service for template operations.
pub struct TemplateService {
    renderer: Box<dyn TemplateRenderer>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Every template identifier, in a fixed order.
    pub fn list(&self) -> ForgeResult<Vec<TemplateInfo>> {
        TemplateId::ALL
            .into_iter()
            .map(|id| {
                let source = self.renderer.source(id)?;
                Ok(TemplateInfo {
                    id,
                    file_name: id.file_name(),
                    origin: source.origin,
                    description: describe(id),
                })
            })
            .collect()
    }

    /// Get one template's text.
    pub fn show(&self, id: TemplateId) -> ForgeResult<TemplateSource> {
        self.renderer.source(id)
    }
}

fn describe(id: TemplateId) -> &'static str {
    match id {
        TemplateId::StepClass => "Chunk-oriented step configuration class",
        TemplateId::TaskletClass => "Tasklet step class",
        TemplateId::RecordIo => "Immutable record used as step input or output",
        TemplateId::ClassIo => "Mutable class used as step input or output",
        TemplateId::RecordRowMapper => "Row mapper producing a record input",
        TemplateId::ClassRowMapper => "Row mapper producing a class input",
        TemplateId::ObjectMapper => "Object mapper between input and output types",
    }
}
