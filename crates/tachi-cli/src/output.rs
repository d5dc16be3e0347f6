//! Progress lines on stdout.
//!
//! Errors never pass through here: `main::handle_error` renders them on
//! stderr so `--quiet` cannot hide a failure.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{AnsiColors, OwoColorize};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Writes user-facing lines to stdout, honouring quiet and colour settings.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when `--no-color`, `NO_COLOR` or the settings file say
    /// so, and whenever stdout is redirected.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg.to_owned())
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(self.marked('\u{2713}', AnsiColors::Green, msg))
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.line(self.marked('\u{26a0}', AnsiColors::Yellow, msg))
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.line(self.marked('\u{2139}', AnsiColors::Blue, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.line(line)
    }

    /// Text written verbatim, even with `--quiet`.
    ///
    /// For output the user asked for explicitly, such as the configuration
    /// echoed by `validate --verbose`.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    fn line(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }

    fn marked(&self, marker: char, color: AnsiColors, msg: &str) -> String {
        if self.no_color {
            format!("{marker} {msg}")
        } else {
            format!("{} {}", marker.color(color).bold(), msg.color(color))
        }
    }
}
