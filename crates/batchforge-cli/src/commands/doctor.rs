//! `batchforge doctor` - verify the environment can run a generation.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use batchforge_core::application::TemplateOrigin;

use crate::{
    commands::{build_scaffold, build_template_service},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Check {
    name: &'static str,
    ok: bool,
    detail: String,
}

impl Check {
    fn from_result(name: &'static str, result: Result<String, String>) -> Self {
        match result {
            Ok(detail) => Self { name, ok: true, detail },
            Err(detail) => Self { name, ok: false, detail },
        }
    }
}

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = config.generation_settings();
    let checks = vec![
        Check::from_result("scaffold", check_scaffold(&config)),
        Check::from_result("workspace", check_writable(&settings.work_root)),
        Check::from_result("archives", check_writable(&settings.archive_dir)),
        Check::from_result("templates", check_templates(&config)),
    ];
    let failed = checks.iter().filter(|c| !c.ok).count();

    if output.is_json() {
        output.json(&checks)?;
    } else {
        output.header("Environment checks:")?;
        for check in &checks {
            let line = format!("{:<10} {}", check.name, check.detail);
            if check.ok {
                output.success(&line)?;
            } else {
                output.failure(&line)?;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::ChecksFailed { failed });
    }
    Ok(())
}

fn check_scaffold(config: &AppConfig) -> Result<String, String> {
    build_scaffold(config)
        .tool_version()
        .map(|version| format!("{} ({version})", config.scaffold.command))
        .map_err(|e| e.to_string())
}

/// Create `dir` if needed and prove a file can be written and removed there.
fn check_writable(dir: &Path) -> Result<String, String> {
    let marker = dir.join(".batchforge-doctor");
    fs::create_dir_all(dir)
        .and_then(|()| fs::write(&marker, b"ok"))
        .and_then(|()| fs::remove_file(&marker))
        .map(|()| format!("{} is writable", dir.display()))
        .map_err(|e| format!("{}: {e}", dir.display()))
}

fn check_templates(config: &AppConfig) -> Result<String, String> {
    let templates = build_template_service(config)
        .and_then(|s| Ok(s.list()?))
        .map_err(|e| e.to_string())?;
    let overridden = templates
        .iter()
        .filter(|t| matches!(t.origin, TemplateOrigin::Override(_)))
        .count();
    debug!(total = templates.len(), overridden, "Templates compiled");
    Ok(format!(
        "{} compiled, {} overridden",
        templates.len(),
        overridden
    ))
}
