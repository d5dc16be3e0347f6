//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tachi",
    bin_name = "tachi",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "GitHub Actions + Azure Container Apps pipeline generator",
    long_about = "tachi turns a YAML project description into GitHub Actions \
                  workflows, Azure Container Apps configs and a SETUP.md \
                  checklist of the secrets and resources they need.",
    after_help = "EXAMPLES:\n\
        \x20 tachi generate --config tachi.yaml --output .\n\
        \x20 tachi generate                      # interactive\n\
        \x20 tachi validate --config tachi.yaml --verbose\n\
        \x20 tachi completions bash > /usr/share/bash-completion/completions/tachi",
    arg_required_else_help = true,
    subcommand_required    = true,
    propagate_version      = true,
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

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render workflows, container configs and SETUP.md.
    #[command(
        visible_alias = "g",
        about = "Generate pipeline files",
        after_help = "EXAMPLES:\n\
            \x20 tachi generate -c tachi.yaml -o ./my-service\n\
            \x20 tachi generate -c tachi.yaml --dry-run\n\
            \x20 tachi generate -c tachi.yaml --force\n\
            \x20 tachi generate                 # prompts for the configuration"
    )]
    Generate(GenerateArgs),

    /// Check a configuration file without generating anything.
    #[command(
        about = "Validate a configuration file",
        after_help = "EXAMPLES:\n\
            \x20 tachi validate -c tachi.yaml\n\
            \x20 tachi validate -c tachi.yaml -v   # print the defaulted configuration"
    )]
    Validate(ValidateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tachi completions bash > ~/.local/share/bash-completion/completions/tachi\n\
            \x20 tachi completions zsh  > ~/.zfunc/_tachi\n\
            \x20 tachi completions fish > ~/.config/fish/completions/tachi.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `tachi generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project configuration file.  Without it tachi asks for the
    /// configuration interactively.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Project configuration file (omit for interactive mode)"
    )]
    pub config: Option<PathBuf>,

    /// Output root.  Falls back to the settings file, then `.`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        env = "TACHI_OUTPUT_DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Preview what would be written without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Write into a non-empty output directory.
    #[arg(short = 'f', long = "force", help = "Overwrite files in a non-empty directory")]
    pub force: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `tachi validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project configuration file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Project configuration file"
    )]
    pub config: PathBuf,

    /// Echo the configuration with every default applied.
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Print the fully defaulted configuration"
    )]
    pub verbose: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tachi completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
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

// ── tests ─────────────────────────────────────────────────────────────────────

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
            "tachi",
            "generate",
            "-c",
            "tachi.yaml",
            "-o",
            "out",
            "--dry-run",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.config, Some(PathBuf::from("tachi.yaml")));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.dry_run);
        assert!(!args.force);
    }

    #[test]
    fn generate_config_is_optional() {
        let cli = Cli::parse_from(["tachi", "generate", "--force"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert!(args.config.is_none());
        assert!(args.force);
    }

    #[test]
    fn validate_requires_config() {
        assert!(Cli::try_parse_from(["tachi", "validate"]).is_err());
        let cli = Cli::parse_from(["tachi", "validate", "-c", "x.yaml", "-v"]);
        assert!(matches!(cli.command, Commands::Validate(ValidateArgs { verbose: true, .. })));
    }

    #[test]
    fn debug_flag_counts_and_is_global() {
        let cli = Cli::parse_from(["tachi", "validate", "-c", "x.yaml", "-dd"]);
        assert_eq!(cli.global.debug, 2);
    }

    #[test]
    fn quiet_and_debug_conflict() {
        let result = Cli::try_parse_from(["tachi", "--quiet", "--debug", "validate", "-c", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_is_a_plain_switch() {
        let cli = Cli::parse_from(["tachi", "--no-color", "validate", "-c", "x.yaml"]);
        assert!(cli.global.no_color);
    }

    #[test]
    fn completions_accepts_known_shells() {
        assert!(Cli::try_parse_from(["tachi", "completions", "zsh"]).is_ok());
        assert!(Cli::try_parse_from(["tachi", "completions", "tcsh"]).is_err());
    }
}
