//! Error types for shipcheck operations.
//!
//! This module defines [`ShipcheckError`], the error type for everything that
//! can stop a run before it starts (bad config, unknown suite, bad flags), and
//! a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Check failures are never errors: the command runner turns timeouts,
//!   spawn failures and non-zero exits into a failed [`CheckResult`]
//! - Use `ShipcheckError` for config and usage problems that abort the run
//! - Use `anyhow::Error` (via `ShipcheckError::Other`) for unexpected errors
//!
//! [`CheckResult`]: crate::checks::CheckResult

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shipcheck operations.
#[derive(Debug, Error)]
pub enum ShipcheckError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested suite is neither built in nor declared in config.
    #[error("Unknown suite: {name}")]
    UnknownSuite { name: String },

    /// `--only`/`--skip` named a check that the suite does not declare.
    #[error("Unknown check '{name}' in suite '{suite}'")]
    UnknownCheck { suite: String, name: String },

    /// Command specification cannot be executed (e.g. empty argv).
    #[error("Invalid command: {message}")]
    InvalidCommand { message: String },

    /// Working directory for a command does not exist.
    #[error("Working directory not found: {path}")]
    WorkingDirNotFound { path: PathBuf },

    /// The command could not be started.
    #[error("Failed to start '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for shipcheck operations.
pub type Result<T> = std::result::Result<T, ShipcheckError>;
