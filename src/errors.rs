// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::command::ProcessStatus;

#[derive(Error, Debug)]
pub enum RuncapError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An environment variable name in the spec does not match the
    /// shell-identifier grammar. Raised before any process is spawned.
    #[error("Invalid environment variable name: '{0}'")]
    InvalidEnvName(String),

    /// The child did not succeed and the caller demanded success.
    ///
    /// `command` and `output` arrive already redacted; this error is safe to
    /// show to a human.
    #[error("Command `{command}` failed: {status}\n{output}")]
    CommandFailed {
        command: String,
        status: ProcessStatus,
        output: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RuncapError>;
