//! Centralized configuration validation.
//!
//! All validation logic lives here, not scattered across entities. Every
//! function returns the *full* list of problems it found so the user can fix
//! everything in one pass; nothing here aborts.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{
    entities::project::{Project, Service},
    value_objects::Strategy,
};

/// Inclusive port range accepted for a service.
pub const PORT_RANGE: std::ops::RangeInclusive<i64> = 1..=65535;

/// One violated field constraint or cross-field invariant.
///
/// `Display` renders the line shown to the user. Service-level errors are
/// prefixed with the service name.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid strategy: '{value}'. Must be one of: {valid}")]
    InvalidStrategy { value: String, valid: String },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("At least one service is required")]
    NoServices,

    #[error("Duplicate service name: '{name}'")]
    DuplicateServiceName { name: String },

    #[error("Service '{service}': name {reason}")]
    InvalidServiceName { service: String, reason: &'static str },

    #[error("Service '{service}': port must be between 1 and 65535 (got {port})")]
    PortOutOfRange { service: String, port: i64 },

    #[error("Service '{service}': cpu must be greater than 0 (got {cpu})")]
    NonPositiveCpu { service: String, cpu: f64 },

    #[error("Service '{service}': memory must be a positive size in Gi, e.g. '0.5Gi' (got '{memory}')")]
    InvalidMemory { service: String, memory: String },

    #[error("Service '{service}': min_replicas cannot be negative (got {min_replicas})")]
    NegativeMinReplicas { service: String, min_replicas: i64 },

    #[error(
        "Service '{service}': max_replicas ({max_replicas}) must be >= min_replicas ({min_replicas})"
    )]
    ReplicaRange {
        service: String,
        min_replicas: i64,
        max_replicas: i64,
    },
}

impl ValidationError {
    /// The service this error belongs to, if any.
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::InvalidServiceName { service, .. }
            | Self::PortOutOfRange { service, .. }
            | Self::NonPositiveCpu { service, .. }
            | Self::InvalidMemory { service, .. }
            | Self::NegativeMinReplicas { service, .. }
            | Self::ReplicaRange { service, .. } => Some(service),
            Self::DuplicateServiceName { name } => Some(name),
            Self::InvalidStrategy { .. } | Self::EmptyField { .. } | Self::NoServices => None,
        }
    }
}

/// Validate a project and everything it contains.
///
/// Order: project-level checks, then duplicate names (once per name), then
/// each service's own errors in declaration order.
pub fn validate_project(project: &Project) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if project.strategy().is_none() {
        errors.push(ValidationError::InvalidStrategy {
            value: project.strategy_name.clone(),
            valid: Strategy::valid_names().join(", "),
        });
    }

    for (field, value) in [
        ("name", &project.name),
        ("azure.resource_group", &project.azure.resource_group),
        ("azure.registry", &project.azure.registry),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    if project.services.is_empty() {
        errors.push(ValidationError::NoServices);
    }

    errors.extend(duplicate_names(&project.services));

    for service in &project.services {
        errors.extend(validate_service(service));
    }

    errors
}

/// Validate one service in isolation.
pub fn validate_service(service: &Service) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = &service.name;

    if let Err(reason) = check_service_name(name) {
        errors.push(ValidationError::InvalidServiceName {
            service: name.clone(),
            reason,
        });
    }

    if !PORT_RANGE.contains(&service.port) {
        errors.push(ValidationError::PortOutOfRange {
            service: name.clone(),
            port: service.port,
        });
    }

    if service.cpu.is_nan() || service.cpu <= 0.0 {
        errors.push(ValidationError::NonPositiveCpu {
            service: name.clone(),
            cpu: service.cpu,
        });
    }

    if !is_valid_memory(&service.memory) {
        errors.push(ValidationError::InvalidMemory {
            service: name.clone(),
            memory: service.memory.clone(),
        });
    }

    if service.min_replicas < 0 {
        errors.push(ValidationError::NegativeMinReplicas {
            service: name.clone(),
            min_replicas: service.min_replicas,
        });
    }

    if service.max_replicas < service.min_replicas {
        errors.push(ValidationError::ReplicaRange {
            service: name.clone(),
            min_replicas: service.min_replicas,
            max_replicas: service.max_replicas,
        });
    }

    errors
}

fn duplicate_names(services: &[Service]) -> Vec<ValidationError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut first_seen = Vec::new();
    for service in services {
        let count = counts.entry(service.name.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(service.name.as_str());
        }
        *count += 1;
    }

    first_seen
        .into_iter()
        .filter(|name| counts[name] > 1)
        .map(|name| ValidationError::DuplicateServiceName {
            name: name.to_string(),
        })
        .collect()
}

/// Azure Container App names: lowercase alphanumerics and hyphens, starting
/// with a letter, not ending with a hyphen.
fn check_service_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("must not be empty");
    }
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("must start with a lowercase letter");
    }
    if name.ends_with('-') {
        return Err("must not end with '-'");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("may only contain lowercase letters, digits and '-'");
    }
    Ok(())
}

fn is_valid_memory(memory: &str) -> bool {
    memory
        .strip_suffix("Gi")
        .and_then(|amount| amount.parse::<f64>().ok())
        .is_some_and(|amount| amount.is_finite() && amount > 0.0)
}
