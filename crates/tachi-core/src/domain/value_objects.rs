//! Domain value objects: Strategy, Environment.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO catalog logic. Which workflows and environments a strategy
//! produces lives in `catalog.rs`. This file's only job is to define the
//! types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and extend `ALL`
//! 3. Add a catalog entry in `catalog.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Strategy ──────────────────────────────────────────────────────────────────

/// A deployment flow: how changes travel from a pull request to production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Merging to `main` deploys straight to production.
    #[default]
    TrunkDirect,
    /// Pushing a version tag deploys to production.
    TrunkRelease,
    /// Merging to `main` deploys to staging; a version tag promotes to production.
    TrunkReleaseStage,
}

impl Strategy {
    /// Every strategy, in the order offered to users.
    pub const ALL: [Strategy; 3] = [
        Strategy::TrunkDirect,
        Strategy::TrunkRelease,
        Strategy::TrunkReleaseStage,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrunkDirect => "trunk-direct",
            Self::TrunkRelease => "trunk-release",
            Self::TrunkReleaseStage => "trunk-release-stage",
        }
    }

    /// One-line summary shown in prompts and in `SETUP.md`.
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::TrunkDirect => "PR previews, merge to main deploys production",
            Self::TrunkRelease => "PR previews, version tags deploy production",
            Self::TrunkReleaseStage => {
                "PR previews, merge to main deploys staging, version tags deploy production"
            }
        }
    }

    /// The accepted spellings, for error messages.
    pub fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Strategy::as_str).collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStrategy {
                value: s.to_string(),
                valid: Self::valid_names().join(", "),
            })
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// A long-lived deployment stage that receives its own container config.
///
/// Pull-request previews are ephemeral and are configured inline by the
/// `pr-deploy` workflow, so they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Suffix appended to Azure resource names (`<project>-<service><suffix>`).
    ///
    /// Production keeps the bare name.
    pub const fn name_suffix(&self) -> &'static str {
        match self {
            Self::Staging => "-staging",
            Self::Production => "",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
