//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `-d`, `-q`, etc.
//! are available on any invocation without repetition.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-d`), twice for DEBUG (`-dd`), three times for
    /// TRACE (`-ddd`).  Conflicts with `--quiet`.
    #[arg(
        short = 'd',
        long = "debug",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-d, -dd, -ddd)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -d      - Info level (progress messages)
    -dd     - Debug level (detailed diagnostics)
    -ddd    - Trace level (very verbose)"
    )]
    pub debug: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "debug",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Also set by a non-empty `NO_COLOR` (see <https://no-color.org>).
    /// Any value other than a falsey one (`0`, `false`, `no`, `off`) counts.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Tool settings file, replacing the one in the user config directory.
    #[arg(
        long = "settings",
        global = true,
        value_name = "FILE",
        help = "Settings file path"
    )]
    pub settings: Option<PathBuf>,
}
