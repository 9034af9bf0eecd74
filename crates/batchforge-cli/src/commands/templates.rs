//! `batchforge templates` - inspect the template catalogue.

use std::str::FromStr;

use serde::Serialize;

use batchforge_core::domain::TemplateId;

use crate::{
    cli::TemplateCommands,
    commands::build_template_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TemplateRow {
    id: &'static str,
    file: &'static str,
    origin: String,
    description: &'static str,
}

pub fn execute(cmd: TemplateCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_template_service(&config)?;

    match cmd {
        TemplateCommands::List => {
            let rows: Vec<TemplateRow> = service
                .list()?
                .into_iter()
                .map(|info| TemplateRow {
                    id: info.id.as_str(),
                    file: info.file_name,
                    origin: info.origin.to_string(),
                    description: info.description,
                })
                .collect();

            if output.is_json() {
                output.json(&rows)?;
                return Ok(());
            }

            output.header("Templates:")?;
            let width = rows.iter().map(|r| r.id.len()).max().unwrap_or(0);
            for row in &rows {
                output.print(&format!(
                    "  {:<width$}  {:<28} {:<10} {}",
                    row.id, row.file, row.origin, row.description
                ))?;
            }
        }

        TemplateCommands::Show { id } => {
            let id = TemplateId::from_str(&id)?;
            let source = service.show(id)?;
            if output.is_json() {
                output.json(&serde_json::json!({
                    "id": source.id.as_str(),
                    "origin": source.origin.to_string(),
                    "text": source.text,
                }))?;
            } else {
                output.raw(&source.text)?;
            }
        }
    }

    Ok(())
}
