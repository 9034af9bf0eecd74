//! `batchforge config` - inspect configuration values.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.raw(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.raw(&config.to_toml()?)?;
            }
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            output.raw(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let display = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };
    match key {
        "workspace.root" => Ok(config.workspace.root.display().to_string()),
        "workspace.archive_dir" => Ok(config.generation_settings().archive_dir.display().to_string()),
        "scaffold.command" => Ok(config.scaffold.command.clone()),
        "scaffold.archetype_group_id" => Ok(config.scaffold.archetype_group_id.clone()),
        "scaffold.archetype_artifact_id" => Ok(config.scaffold.archetype_artifact_id.clone()),
        "scaffold.archetype_version" => Ok(config.scaffold.archetype_version.clone()),
        "scaffold.timeout_secs" => Ok(config.scaffold.timeout_secs.to_string()),
        "templates.override_dir" => Ok(display(&config.templates.override_dir)),
        "archive.exclude_dirs" => Ok(config.archive.exclude_dirs.join(",")),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "scaffold.command").unwrap(), "mvn");
        assert_eq!(get_config_value(&cfg, "scaffold.timeout_secs").unwrap(), "300");
    }

    #[test]
    fn archive_dir_defaults_under_workspace_root() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "workspace.archive_dir").unwrap();
        assert!(value.ends_with("archives"));
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn cleanup_delay_is_not_configurable() {
        assert!(get_config_value(&AppConfig::default(), "archive.cleanup_delay_secs").is_err());
    }

    #[test]
    fn exclude_dirs_are_comma_joined() {
        let mut cfg = AppConfig::default();
        cfg.archive.exclude_dirs.push("build".into());
        assert_eq!(
            get_config_value(&cfg, "archive.exclude_dirs").unwrap(),
            "target,build"
        );
    }
}
