//! `batchforge generate` - build a project archive from a request.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};

use batchforge_adapters::ArchiveJanitor;
use batchforge_core::application::GeneratedArchive;
use batchforge_core::domain::{BatchSpec, GenerationPlan};

use crate::{
    cli::GenerateArgs,
    commands::{build_generation_service, read_request},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct PlannedEntry<'a> {
    step: &'a str,
    template: &'a str,
    path: String,
}

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    artifact_id: &'a str,
    steps: usize,
    config: String,
    files: Vec<PlannedEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateReport {
    request_id: String,
    archive: PathBuf,
    entries: usize,
    bytes: u64,
    files_generated: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    staged_archive: Option<PathBuf>,
}

#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let payload = read_request(&args.request)?;
    let service = build_generation_service(&config)?;

    if args.dry_run {
        let (spec, plan) = service.plan(&payload)?;
        return print_plan(&spec, &plan, &output);
    }

    ensure_output_dir(&args.output)?;

    let spinner = output.spinner("Generating project");
    let result = service.generate(&payload);
    spinner.finish_and_clear();
    let archive = result?;

    let delivered = deliver(&archive, &args.output);

    let staged = if args.keep_archive {
        Some(archive.path.clone())
    } else {
        discard_staged(&archive.path);
        None
    };
    let destination = delivered?;

    info!(archive = %destination.display(), "Archive delivered");

    if output.is_json() {
        output.json(&GenerateReport {
            request_id: archive.request_id.to_string(),
            archive: destination,
            entries: archive.entries,
            bytes: archive.bytes,
            files_generated: archive.files_generated,
            staged_archive: staged,
        })?;
        return Ok(());
    }

    output.success(&format!("Generated {}", destination.display()))?;
    output.print(&format!(
        "  {} source file(s), {} archive entries, {}",
        archive.files_generated,
        archive.entries,
        human_bytes(archive.bytes)
    ))?;
    if let Some(staged) = staged {
        output.info(&format!("Staged copy kept at {}", staged.display()))?;
    }
    Ok(())
}

fn print_plan(spec: &BatchSpec, plan: &GenerationPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let files = plan
            .files()
            .iter()
            .map(|f| PlannedEntry {
                step: &f.step,
                template: f.template.as_str(),
                path: f.path.to_string(),
            })
            .collect();
        output.json(&PlanReport {
            artifact_id: &spec.artifact_id,
            steps: spec.steps.len(),
            config: plan.config_path().to_string(),
            files,
        })?;
        return Ok(());
    }

    output.header(&format!(
        "Plan for {} ({} step(s), {} file(s))",
        spec.artifact_id,
        spec.steps.len(),
        plan.len()
    ))?;
    output.print(&format!("  {}  (configuration)", plan.config_path()))?;
    for file in plan.files() {
        output.print(&format!("  {}  [{} / {}]", file.path, file.step, file.template))?;
    }
    output.info("Dry run: nothing was generated")?;
    Ok(())
}

fn ensure_output_dir(dir: &Path) -> CliResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("--output '{}' is not a directory", dir.display()),
            source: None,
        });
    }
    fs::create_dir_all(dir).map_err(|e| CliError::IoError {
        message: format!("Failed to create output directory '{}'", dir.display()),
        source: e,
    })
}

/// Copy the staged archive into `dir` under its download name.
fn deliver(archive: &GeneratedArchive, dir: &Path) -> CliResult<PathBuf> {
    let destination = dir.join(&archive.file_name);
    if destination.exists() {
        return Err(CliError::FileExists { path: destination });
    }
    fs::copy(&archive.path, &destination).map_err(|e| CliError::IoError {
        message: format!("Failed to copy archive to '{}'", destination.display()),
        source: e,
    })?;
    Ok(destination)
}

/// Deletes the staged copy once it has been delivered. The CLI owns the only
/// consumer, so there is nothing to wait for.
fn discard_staged(path: &Path) {
    let cleanup = ArchiveJanitor::new(Duration::ZERO).schedule(path);
    if !cleanup.wait() {
        warn!(path = %path.display(), "Staged archive was not removed");
    }
}

fn human_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn staged(dir: &Path) -> GeneratedArchive {
        let path = dir.join("demo-1-ab.zip");
        fs::write(&path, b"PK").unwrap();
        GeneratedArchive {
            request_id: Default::default(),
            path,
            file_name: "demo-1-ab.zip".into(),
            entries: 1,
            bytes: 2,
            files_generated: 1,
        }
    }

    #[test]
    fn deliver_copies_under_download_name() {
        let staging = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = staged(staging.path());

        let dest = deliver(&archive, out.path()).unwrap();
        assert_eq!(dest, out.path().join("demo-1-ab.zip"));
        assert_eq!(fs::read(&dest).unwrap(), b"PK");
    }

    #[test]
    fn deliver_refuses_to_overwrite() {
        let staging = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = staged(staging.path());
        fs::write(out.path().join("demo-1-ab.zip"), b"old").unwrap();

        let err = deliver(&archive, out.path()).unwrap_err();
        assert!(matches!(err, CliError::FileExists { .. }));
        assert_eq!(fs::read(out.path().join("demo-1-ab.zip")).unwrap(), b"old");
    }

    #[test]
    fn output_must_be_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.zip");
        fs::write(&file, b"").unwrap();
        assert!(matches!(
            ensure_output_dir(&file),
            Err(CliError::InvalidInput { .. })
        ));
        assert!(ensure_output_dir(&dir.path().join("nested/dist")).is_ok());
    }

    #[test]
    fn discard_removes_staged_archive() {
        let staging = TempDir::new().unwrap();
        let archive = staged(staging.path());
        discard_staged(&archive.path);
        assert!(!archive.path.exists());
    }

    #[test]
    fn byte_sizes_are_human_readable() {
        assert_eq!(human_bytes(512), "512 B");
        assert_eq!(human_bytes(2048), "2.0 KiB");
        assert_eq!(human_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
