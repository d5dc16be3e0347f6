//! Application services - orchestrate use cases.

pub mod generate_service;

pub use generate_service::{
    CONTAINER_CONFIGS_DIR, GenerateOptions, GenerateService, GenerationReport, SETUP_FILE,
    WORKFLOWS_DIR,
};
