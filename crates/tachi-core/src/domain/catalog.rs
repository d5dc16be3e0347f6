//! Strategy catalog: which workflows and environments each strategy produces.
//!
//! Each strategy is described exactly once by its [`StrategyDef`] in
//! [`STRATEGY_CATALOG`]. Selection is a table lookup, never branching, so
//! adding a strategy means adding one variant in `value_objects.rs` and one
//! entry here.

use crate::domain::value_objects::{Environment, Strategy};

// ── Workflow templates ────────────────────────────────────────────────────────

/// A GitHub Actions workflow the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowTemplate {
    /// Build and deploy a preview environment for every pull request.
    PrDeploy,
    /// Tear the preview environment down when the pull request closes.
    PrCleanup,
    /// Deploy production on every push to `main`.
    ProdDeployOnMerge,
    /// Deploy production when a `v*` tag is pushed.
    ProdDeployOnTag,
    /// Deploy staging on every push to `main`.
    StageDeployOnMerge,
}

impl WorkflowTemplate {
    /// Logical identifier, also the output file stem.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::PrDeploy => "pr-deploy",
            Self::PrCleanup => "pr-cleanup",
            Self::ProdDeployOnMerge => "prod-deploy-on-merge",
            Self::ProdDeployOnTag => "prod-deploy-on-tag",
            Self::StageDeployOnMerge => "stage-deploy-on-merge",
        }
    }

    /// Name of the template asset (`workflows/<id>.yaml.j2`).
    pub fn template_name(&self) -> String {
        format!("workflows/{}{}", self.id(), TEMPLATE_SUFFIX)
    }

    /// Output file name under `.github/workflows`.
    pub fn output_file_name(&self) -> String {
        output_name_for(&format!("{}{}", self.id(), TEMPLATE_SUFFIX))
    }

    /// The environment this workflow deploys to, if it targets a long-lived one.
    pub const fn environment(&self) -> Option<Environment> {
        match self {
            Self::PrDeploy | Self::PrCleanup => None,
            Self::ProdDeployOnMerge | Self::ProdDeployOnTag => Some(Environment::Production),
            Self::StageDeployOnMerge => Some(Environment::Staging),
        }
    }
}

/// Suffix carried by template assets and stripped from output names.
pub const TEMPLATE_SUFFIX: &str = ".yaml.j2";

/// Template asset for per-service, per-environment container configs.
pub const CONTAINER_APP_TEMPLATE: &str = "container-apps/app.yaml.j2";

/// Template asset for the setup document.
pub const SETUP_TEMPLATE: &str = "SETUP.md.j2";

/// Strip the templating suffix from an asset name and keep a `.yaml` extension.
///
/// `prod-deploy-on-tag.yaml.j2` → `prod-deploy-on-tag.yaml`.
pub fn output_name_for(template_file: &str) -> String {
    let stem = template_file
        .strip_suffix(".j2")
        .unwrap_or(template_file);
    let stem = stem
        .strip_suffix(".yaml")
        .or_else(|| stem.strip_suffix(".yml"))
        .unwrap_or(stem);
    format!("{stem}.yaml")
}

// ── Strategy definitions ──────────────────────────────────────────────────────

/// Everything the generator needs to know about one strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyDef {
    pub strategy: Strategy,

    /// Workflows to render, in output order.
    pub workflows: &'static [WorkflowTemplate],

    /// Long-lived environments that receive container configs.
    pub environments: &'static [Environment],
}

/// Single source of truth for strategy → artifacts.
pub static STRATEGY_CATALOG: &[StrategyDef] = &[
    StrategyDef {
        strategy: Strategy::TrunkDirect,
        workflows: &[
            WorkflowTemplate::PrDeploy,
            WorkflowTemplate::PrCleanup,
            WorkflowTemplate::ProdDeployOnMerge,
        ],
        environments: &[Environment::Production],
    },
    StrategyDef {
        strategy: Strategy::TrunkRelease,
        workflows: &[
            WorkflowTemplate::PrDeploy,
            WorkflowTemplate::PrCleanup,
            WorkflowTemplate::ProdDeployOnTag,
        ],
        environments: &[Environment::Production],
    },
    StrategyDef {
        strategy: Strategy::TrunkReleaseStage,
        workflows: &[
            WorkflowTemplate::PrDeploy,
            WorkflowTemplate::PrCleanup,
            WorkflowTemplate::StageDeployOnMerge,
            WorkflowTemplate::ProdDeployOnTag,
        ],
        environments: &[Environment::Staging, Environment::Production],
    },
];

/// Entry used when a strategy name is not in the catalog.
///
/// Validation rejects unknown strategies before the catalog is consulted;
/// this only keeps lookups total.
const FALLBACK: Strategy = Strategy::TrunkDirect;

// ── Lookup helpers ────────────────────────────────────────────────────────────

pub fn find_strategy(strategy: Strategy) -> &'static StrategyDef {
    STRATEGY_CATALOG
        .iter()
        .find(|def| def.strategy == strategy)
        .unwrap_or(&STRATEGY_CATALOG[0])
}

/// Ordered workflow templates for `strategy`.
pub fn workflows_for(strategy: Strategy) -> &'static [WorkflowTemplate] {
    find_strategy(strategy).workflows
}

/// Ordered workflow templates for a raw strategy name, falling back to
/// `trunk-direct` when the name is unknown.
pub fn workflows_for_name(name: &str) -> &'static [WorkflowTemplate] {
    workflows_for(name.parse().unwrap_or(FALLBACK))
}

/// Environments that receive container configs under `strategy`.
pub fn environments_for(strategy: Strategy) -> &'static [Environment] {
    find_strategy(strategy).environments
}

/// Whether `strategy` renders a staging-specific workflow.
pub fn includes_staging(strategy: Strategy) -> bool {
    workflows_for(strategy)
        .iter()
        .any(|w| w.environment() == Some(Environment::Staging))
}

/// Panics if the catalog is internally inconsistent.
///
/// Checked by a unit test; kept public so downstream crates can assert it too.
pub fn assert_catalog_integrity() {
    for strategy in Strategy::ALL {
        let matches = STRATEGY_CATALOG
            .iter()
            .filter(|def| def.strategy == strategy)
            .count();
        assert_eq!(matches, 1, "{strategy} must appear exactly once in the catalog");
    }

    for def in STRATEGY_CATALOG {
        assert!(!def.workflows.is_empty(), "{} has no workflows", def.strategy);
        assert!(!def.environments.is_empty(), "{} has no environments", def.strategy);

        for (i, w) in def.workflows.iter().enumerate() {
            assert!(
                !def.workflows[..i].contains(w),
                "{} lists {} twice",
                def.strategy,
                w.id()
            );
            if let Some(env) = w.environment() {
                assert!(
                    def.environments.contains(&env),
                    "{} deploys {} but does not list that environment",
                    def.strategy,
                    env
                );
            }
        }
    }
}
