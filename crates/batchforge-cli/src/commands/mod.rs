//! Command handlers.
//!
//! Each submodule turns parsed arguments into calls on `batchforge-core`
//! services. Adapter wiring is shared here so every command builds the
//! pipeline the same way from [`AppConfig`].

use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use batchforge_adapters::{
    HandlebarsRenderer, LocalFilesystem, MavenArchetypeGenerator, RequestIsolationKeys,
    ZipArchiveWriter,
};
use batchforge_core::application::{
    GenerationPorts, GenerationService, TemplateRenderer, TemplateService,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod completions;
pub mod config;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod templates;
pub mod validate;

/// Path argument meaning "read from stdin".
pub const STDIN_MARKER: &str = "-";

/// Read and parse a request document from a file or stdin.
pub fn read_request(path: &Path) -> CliResult<Value> {
    let text = if path == Path::new(STDIN_MARKER) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CliError::RequestNotFound {
                path: path.to_path_buf(),
            },
            _ => CliError::IoError {
                message: format!("Failed to read '{}'", path.display()),
                source: e,
            },
        })?
    };
    parse_request(&text)
}

pub fn parse_request(text: &str) -> CliResult<Value> {
    let value: Value = serde_json::from_str(text).map_err(|e| CliError::InvalidRequest {
        message: e.to_string(),
        source: e,
    })?;
    debug!(bytes = text.len(), "Request parsed");
    Ok(value)
}

/// Renderer with configured overrides merged over the built-ins.
pub fn build_renderer(config: &AppConfig) -> CliResult<HandlebarsRenderer> {
    let renderer = match &config.templates.override_dir {
        Some(dir) => HandlebarsRenderer::with_overrides(dir)?,
        None => HandlebarsRenderer::builtin()?,
    };
    Ok(renderer)
}

pub fn build_template_service(config: &AppConfig) -> CliResult<TemplateService> {
    let renderer: Box<dyn TemplateRenderer> = Box::new(build_renderer(config)?);
    Ok(TemplateService::new(renderer))
}

pub fn build_scaffold(config: &AppConfig) -> MavenArchetypeGenerator {
    MavenArchetypeGenerator::new(config.scaffold.clone())
}

/// Full generation pipeline backed by the real adapters.
pub fn build_generation_service(config: &AppConfig) -> CliResult<GenerationService> {
    let ports = GenerationPorts {
        scaffold: Box::new(build_scaffold(config)),
        renderer: Box::new(build_renderer(config)?),
        filesystem: Box::new(LocalFilesystem::new()),
        archiver: Box::new(ZipArchiveWriter::new(config.archive.exclude_dirs.clone())),
        keys: Box::new(RequestIsolationKeys::new()),
    };
    Ok(GenerationService::new(ports, config.generation_settings()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let err = read_request(Path::new("/no/such/request.json")).unwrap_err();
        assert!(matches!(err, CliError::RequestNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn malformed_json_is_invalid_request() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, "{ \"batch\": ").unwrap();

        let err = read_request(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidRequest { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parses_request_document() {
        let value = parse_request(r#"{"batch":{"artifactId":"demo"}}"#).unwrap();
        assert_eq!(value["batch"]["artifactId"], "demo");
    }

    #[test]
    fn missing_override_dir_is_configuration_error() {
        let mut config = AppConfig::default();
        config.templates.override_dir = Some("/no/such/templates".into());
        let err = build_renderer(&config).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
