//! Tool settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate never sees them.  These are the
//! settings of `tachi` itself, not the project configuration it generates
//! from.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `TACHI_*` environment variables, `__` between section and key
//!    (`TACHI_DEFAULTS__LOCATION=westeurope`)
//! 3. Settings file: `--settings FILE`, else `tachi/config.toml` in the
//!    platform config directory when it exists
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tachi_core::domain::{Strategy, defaults};

/// Tool settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults offered while prompting and used when flags are absent.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Strategy preselected by the interactive prompt.
    pub strategy: String,
    /// Azure region offered by the interactive prompt.
    pub location: String,
    /// Output root when neither `--output` nor `TACHI_OUTPUT_DIR` is given.
    pub output_dir: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            strategy: Strategy::default().as_str().to_string(),
            location: defaults::LOCATION.to_string(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load settings from the file and the environment, on top of defaults.
    ///
    /// An explicit `settings_file` must exist; the default location is
    /// optional.
    pub fn load(settings_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match settings_file {
            Some(path) => Some(File::from(path).required(true)),
            None => Self::config_path().map(|path| File::from(path).required(false)),
        };

        Self::load_from(file, Environment::with_prefix("TACHI"))
    }

    fn load_from(
        file: Option<File<config::FileSourceFile, config::FileFormat>>,
        env: Environment,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let settings = builder
            .add_source(env.prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Path to the default settings file, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "tachi", "tachi")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The strategy to preselect, ignoring unknown names.
    pub fn default_strategy(&self) -> Strategy {
        self.defaults.strategy.parse().unwrap_or_default()
    }
}
