// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnsibleError {
    /// Required builder fields are missing. Raised before any process is
    /// spawned.
    #[error("{0}")]
    Validation(String),

    /// The child process did not exit with code 0.
    ///
    /// The message is the full stdout/stderr transcript, so callers get the
    /// diagnostic output without having subscribed to streaming events.
    #[error("{output}")]
    Execution { code: Option<i32>, output: String },

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnsibleError {
    /// Exit code of the failed child process, if this is an execution error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            AnsibleError::Execution { code, .. } => *code,
            _ => None,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, AnsibleError>;
