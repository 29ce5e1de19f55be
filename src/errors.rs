// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunAndWaitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The host CLI exited unsuccessfully.
    #[error("`{command}` failed: {stderr}")]
    HostError { command: String, stderr: String },

    #[error("Empty task ID")]
    EmptyTaskId,

    #[error("Invalid number of tasks found for name {name}: {count}")]
    TaskCount { name: String, count: u64 },

    #[error("task failed")]
    TaskFailed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RunAndWaitError>;
