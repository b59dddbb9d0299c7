//! tfc-workspace-action - Terraform Cloud workspace settings for CI pipelines.
//!
//! This library turns the `INPUT_*` environment variables a CI runner hands
//! to an action into a sequence of `tfc-cli workspaces <subcommand>` calls.
//! A static registry of setting descriptors drives resolution, validation,
//! and argument assembly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod tfc;
pub mod validation;

/// Library-level error type for workspace setting runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{0}' setting not provided")]
    MissingRequiredInput(String),

    #[error(
        "If an \"unset\" variable is specified, it must have a value parsable as boolean (got \"{value}\")"
    )]
    UnparsableBoolean { setting: String, value: String },

    #[error("{setting} and {conflicting} are mutually exclusive")]
    MutualExclusion {
        setting: String,
        conflicting: String,
    },

    #[error("{group}* variables are mutually necessary ({setting} requires {missing})")]
    MutualNecessity {
        group: String,
        setting: String,
        missing: String,
    },

    #[error("Error validating {subcommand} {flag}: {value} not found in [{}]", .allowed.join(", "))]
    DomainViolation {
        subcommand: String,
        flag: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("tfc-cli workspaces {subcommand} failed: {status}")]
    ToolFailed { subcommand: String, status: String },

    #[error("Failed to run '{program}': {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Invalid setting registry: {0}")]
    InvalidRegistry(String),
}

/// Result type alias for workspace setting runs.
pub type Result<T> = std::result::Result<T, Error>;
