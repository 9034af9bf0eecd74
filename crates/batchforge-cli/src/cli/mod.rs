//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, LogFormat, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "batchforge",
    bin_name = "batchforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate Spring Batch projects from declarative step definitions",
    long_about = "Batchforge turns a JSON batch description into a buildable \
                  Maven project: it runs the archetype, renders step, record \
                  and mapper classes, and packs the result into a zip archive.",
    after_help = "EXAMPLES:\n\
        \x20 batchforge validate request.json\n\
        \x20 batchforge generate request.json -o ./dist\n\
        \x20 cat request.json | batchforge generate - --dry-run\n\
        \x20 batchforge templates show step-class",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project archive from a request.
    #[command(
        visible_alias = "gen",
        about = "Generate a project archive",
        after_help = "EXAMPLES:\n\
            \x20 batchforge generate request.json\n\
            \x20 batchforge generate request.json --output ./dist\n\
            \x20 batchforge generate - --dry-run < request.json"
    )]
    Generate(GenerateArgs),

    /// Check a request without generating anything.
    #[command(about = "Validate a request")]
    Validate(ValidateArgs),

    /// Inspect the templates used for generation.
    #[command(about = "List or show templates", subcommand)]
    Templates(TemplateCommands),

    /// Check that the generator and workspace are usable.
    #[command(about = "Check the environment")]
    Doctor,

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 batchforge init           # platform config directory\n\
            \x20 batchforge init --local   # ./batchforge.toml"
    )]
    Init(InitArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 batchforge config get scaffold.command\n\
            \x20 batchforge config list\n\
            \x20 batchforge config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 batchforge completions bash > ~/.local/share/bash-completion/completions/batchforge\n\
            \x20 batchforge completions zsh  > ~/.zfunc/_batchforge"
    )]
    Completions(CompletionsArgs),
}

// ── generate / validate ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// JSON request file, or `-` for stdin.
    #[arg(value_name = "REQUEST", help = "Request JSON file ('-' for stdin)")]
    pub request: PathBuf,

    /// Directory that receives the archive.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to write the archive to"
    )]
    pub output: PathBuf,

    /// List the files that would be generated, without running anything.
    #[arg(long = "dry-run", help = "Show the generation plan only")]
    pub dry_run: bool,

    /// Leave the staged archive in the archive directory after delivery.
    #[arg(long = "keep-archive", help = "Keep the staged archive after copying it")]
    pub keep_archive: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// JSON request file, or `-` for stdin.
    #[arg(value_name = "REQUEST", help = "Request JSON file ('-' for stdin)")]
    pub request: PathBuf,
}

// ── templates ─────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// List every template with its origin.
    #[command(visible_alias = "ls")]
    List,
    /// Print one template's text.
    Show {
        /// Identifier (`step-class`) or file name (`StepSteplet.java.hbs`).
        id: String,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `batchforge.toml` in the current directory.
    #[arg(long = "local", help = "Create configuration in the current directory")]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `scaffold.timeout_secs`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "batchforge",
            "generate",
            "request.json",
            "-o",
            "dist",
            "--keep-archive",
        ]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.request, PathBuf::from("request.json"));
                assert_eq!(args.output, PathBuf::from("dist"));
                assert!(args.keep_archive);
                assert!(!args.dry_run);
            }
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn generate_defaults_to_current_directory() {
        let cli = Cli::parse_from(["batchforge", "gen", "-"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate");
        };
        assert_eq!(args.request, PathBuf::from("-"));
        assert_eq!(args.output, PathBuf::from("."));
    }

    #[test]
    fn templates_show_takes_an_id() {
        let cli = Cli::parse_from(["batchforge", "templates", "show", "object-mapper"]);
        assert!(matches!(
            cli.command,
            Commands::Templates(TemplateCommands::Show { ref id }) if id == "object-mapper"
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["batchforge", "--quiet", "--verbose", "doctor"]);
        assert!(result.is_err());
    }
}
