//! tachi core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for `tachi`, which
//! turns a YAML project description into GitHub Actions workflows, Azure
//! Container Apps configs and a setup checklist.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            tachi-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (Driven: Filesystem, Renderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tachi-adapters (Infrastructure)     │
//! │  (LocalFilesystem, JinjaRenderer, YAML) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Project, Validation, Strategy Catalog) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tachi_core::prelude::*;
//!
//! let project = Project::new("demo", Strategy::TrunkDirect, AzureTarget::new("rg", "acr"))
//!     .with_service(Service::new("web").with_port(3000));
//!
//! let service = GenerateService::new(renderer, filesystem);
//! service.generate(&project, "./out".as_ref(), GenerateOptions::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerateService, GenerationReport,
        ports::{Filesystem, RenderContext, TemplateRenderer},
    };
    pub use crate::domain::{
        AzureTarget, Environment, OutputPlan, Project, Service, SetupGuide, Strategy,
        ValidationError,
    };
    pub use crate::error::{ErrorCategory, TachiError, TachiResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
