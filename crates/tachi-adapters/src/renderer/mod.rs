//! Template renderer adapters.

mod jinja;

pub use jinja::JinjaRenderer;
