//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `BATCHFORGE_<SECTION>__<KEY>`, e.g.
//!    `BATCHFORGE_SCAFFOLD__TIMEOUT_SECS=600`
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use batchforge_adapters::ScaffoldSettings;
use batchforge_core::application::GenerationSettings;

use crate::error::{CliError, CliResult};

pub const ENV_PREFIX: &str = "BATCHFORGE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where transient trees and staged archives live.
    pub workspace: WorkspaceConfig,
    /// External project generator.
    pub scaffold: ScaffoldSettings,
    pub templates: TemplateConfig,
    pub archive: ArchiveConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    /// Defaults to `<root>/archives`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `.hbs` files replacing built-ins by file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Top-level directories left out of archives.
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; the `--output-format` flag wins.
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            scaffold: ScaffoldSettings::default(),
            templates: TemplateConfig::default(),
            archive: ArchiveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir().join("batchforge"),
            archive_dir: None,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec!["target".into()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and process environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        match config_file {
            Some(path) => Self::load_from(path, true, None),
            None => Self::load_from(&Self::config_path(), false, None),
        }
    }

    /// Load with an explicit environment map instead of the process one.
    pub fn load_from(
        file: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("archive.exclude_dirs")
            .source(env);

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(file).format(FileFormat::Toml).required(required))
            .add_source(environment)
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.batchforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "batchforge", "batchforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".batchforge.toml"))
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        let settings = GenerationSettings::new(&self.workspace.root);
        match &self.workspace.archive_dir {
            Some(dir) => settings.with_archive_dir(dir),
            None => settings,
        }
    }

    /// Pretty TOML, as written by `init` and shown by `config list`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load_from(Path::new("/no/such/config.toml"), false, env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.scaffold.command, "mvn");
        assert_eq!(cfg.archive.exclude_dirs, vec!["target".to_string()]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(matches!(
            AppConfig::load_from(Path::new("/no/such/config.toml"), true, env(&[])),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[scaffold]\ncommand = \"./mvnw\"\ntimeout_secs = 60\n\n[templates]\noverride_dir = \"/opt/tpl\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, env(&[])).unwrap();
        assert_eq!(cfg.scaffold.command, "./mvnw");
        assert_eq!(cfg.scaffold.timeout_secs, 60);
        assert_eq!(cfg.scaffold.archetype_artifact_id, "declarative-batch-archetype");
        assert_eq!(cfg.templates.override_dir, Some(PathBuf::from("/opt/tpl")));
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[scaffold]\ntimeout_secs = 60\n").unwrap();

        let cfg = AppConfig::load_from(
            &path,
            true,
            env(&[
                ("BATCHFORGE_SCAFFOLD__TIMEOUT_SECS", "900"),
                ("BATCHFORGE_ARCHIVE__EXCLUDE_DIRS", "target,build"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.scaffold.timeout_secs, 900);
        assert_eq!(cfg.archive.exclude_dirs, vec!["target", "build"]);
    }

    #[test]
    fn archive_dir_defaults_under_workspace_root() {
        let mut cfg = AppConfig::default();
        cfg.workspace.root = PathBuf::from("/srv/forge");
        assert_eq!(
            cfg.generation_settings().archive_dir,
            PathBuf::from("/srv/forge/archives")
        );

        cfg.workspace.archive_dir = Some(PathBuf::from("/srv/out"));
        assert_eq!(cfg.generation_settings().archive_dir, PathBuf::from("/srv/out"));
    }

    #[test]
    fn default_toml_round_trips_through_loader() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(
            AppConfig::load_from(&path, true, env(&[])).unwrap(),
            AppConfig::default()
        );
    }
}
