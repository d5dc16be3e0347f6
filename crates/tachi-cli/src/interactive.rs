//! Interactive configuration session for `tachi generate` without `--config`.
//!
//! The question flow lives in [`run_session`] and talks to the terminal only
//! through the [`Prompter`] trait, so it can be driven by a script in tests.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use tachi_core::domain::{AzureTarget, Project, Service, Strategy, defaults};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// File name offered when saving the answers.
pub const DEFAULT_CONFIG_FILE: &str = "tachi.yaml";

/// Source of answers.
///
/// An empty answer to `input`, `select` or `confirm` yields `default`.
pub trait Prompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> CliResult<String>;
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize>;
    fn confirm(&mut self, prompt: &str, default: bool) -> CliResult<bool>;

    /// Tell the user why an answer was not accepted.
    fn reject(&mut self, message: &str);
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub project: Project,
    /// Where to save the configuration, if the user wants it saved.
    pub save_to: Option<PathBuf>,
    /// `false` when the user declined generating now.
    pub generate: bool,
}

/// Ask for a complete project configuration.
pub fn run_session(prompter: &mut dyn Prompter, settings: &AppConfig) -> CliResult<SessionOutcome> {
    let name = ask_required(prompter, "Project name", None)?;
    let strategy = ask_strategy(prompter, settings.default_strategy())?;
    let resource_group = ask_required(prompter, "Azure resource group", Some(&format!("{name}-rg")))?;
    let registry = ask_required(prompter, "Azure container registry name", None)?;
    let location = ask_required(prompter, "Azure location", Some(&settings.defaults.location))?;

    let azure = AzureTarget::new(resource_group, registry).with_location(location);
    let mut project = Project::new(name, strategy, azure);

    loop {
        project.services.push(ask_service(prompter)?);
        if !prompter.confirm("Add another service?", false)? {
            break;
        }
    }

    let save_to = if prompter.confirm("Save configuration?", true)? {
        Some(PathBuf::from(ask_required(
            prompter,
            "Save to",
            Some(DEFAULT_CONFIG_FILE),
        )?))
    } else {
        None
    };
    let generate = prompter.confirm("Generate files now?", true)?;

    debug!(
        project = %project.name,
        services = project.services.len(),
        save = save_to.is_some(),
        generate,
        "Interactive session finished"
    );

    Ok(SessionOutcome {
        project,
        save_to,
        generate,
    })
}

fn ask_strategy(prompter: &mut dyn Prompter, preselected: Strategy) -> CliResult<Strategy> {
    let labels: Vec<String> = Strategy::ALL
        .iter()
        .map(|s| format!("{}: {}", s.as_str(), s.summary()))
        .collect();
    let items: Vec<&str> = labels.iter().map(String::as_str).collect();
    let default = Strategy::ALL
        .iter()
        .position(|s| *s == preselected)
        .unwrap_or_default();

    let index = prompter.select("Deployment strategy", &items, default)?;
    Strategy::ALL
        .get(index)
        .copied()
        .ok_or_else(|| CliError::Prompt {
            message: format!("no strategy at position {index}"),
        })
}

fn ask_service(prompter: &mut dyn Prompter) -> CliResult<Service> {
    let name = ask_required(prompter, "Service name", None)?;
    let dockerfile = ask_required(prompter, "Dockerfile", Some(defaults::DOCKERFILE))?;
    let context = ask_required(prompter, "Build context", Some(defaults::CONTEXT))?;
    let port = ask_parsed(prompter, "Port", defaults::PORT)?;
    let external = prompter.confirm("Expose externally?", defaults::EXTERNAL)?;
    let cpu = ask_parsed(prompter, "CPU cores", defaults::CPU)?;
    let memory = ask_required(prompter, "Memory", Some(defaults::MEMORY))?;
    let min_replicas = ask_parsed(prompter, "Minimum replicas", defaults::MIN_REPLICAS)?;
    let max_replicas = ask_parsed(prompter, "Maximum replicas", defaults::MAX_REPLICAS)?;

    let mut service = Service::new(name)
        .with_port(port)
        .with_cpu(cpu)
        .with_memory(memory)
        .with_replicas(min_replicas, max_replicas);
    service.dockerfile = dockerfile;
    service.context = context;
    service.external = external;
    Ok(service)
}

fn ask_required(prompter: &mut dyn Prompter, prompt: &str, default: Option<&str>) -> CliResult<String> {
    loop {
        let answer = prompter.input(prompt, default)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        prompter.reject(&format!("{prompt} is required"));
    }
}

fn ask_parsed<T>(prompter: &mut dyn Prompter, prompt: &str, default: T) -> CliResult<T>
where
    T: FromStr + Display,
{
    let default = default.to_string();
    loop {
        let answer = prompter.input(prompt, Some(&default))?;
        match answer.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => prompter.reject(&format!("'{}' is not a valid {}", answer.trim(), prompt)),
        }
    }
}

// ── Terminal prompter ─────────────────────────────────────────────────────────

/// Prompter backed by the terminal.
///
/// Fails with [`CliError::InteractiveUnavailable`] when stdin or stderr is
/// not a terminal, or when the `interactive` feature is off.
#[cfg(feature = "interactive")]
pub fn terminal_prompter() -> CliResult<Box<dyn Prompter>> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        return Err(CliError::InteractiveUnavailable {
            reason: "stdin is not a terminal",
        });
    }
    Ok(Box::new(DialoguerPrompter))
}

#[cfg(not(feature = "interactive"))]
pub fn terminal_prompter() -> CliResult<Box<dyn Prompter>> {
    Err(CliError::InteractiveUnavailable {
        reason: "this build does not include the `interactive` feature",
    })
}

#[cfg(feature = "interactive")]
struct DialoguerPrompter;

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> CliResult<String> {
        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> CliResult<usize> {
        dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> CliResult<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn reject(&mut self, message: &str) {
        let _ = console::Term::stderr().write_line(message);
    }
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    CliError::Prompt {
        message: err.to_string(),
    }
}
