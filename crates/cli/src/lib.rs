//! Synergos CLI - command orchestration over the approval workflow
//!
//! This crate provides the `synergos` binary, its configuration loading and
//! the scripted-run support used for demos and tests.

pub mod commands;
pub mod config;
pub mod context;
pub mod script;

pub use config::{ConfigError, SynergosConfig};
pub use context::AppContext;
