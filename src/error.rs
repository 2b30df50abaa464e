//! Error types for dotnet-detect operations.
//!
//! This module defines [`DetectError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DetectError` for failures that stop a command from producing a report
//! - Registry read faults are NOT errors here; they are report data
//!   (see [`crate::store::StoreFault`])
//! - Use `anyhow::Error` (via `DetectError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dotnet-detect operations.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The registry access prerequisites are missing on this host.
    #[error("Registry access unavailable: {reason}")]
    Unavailable { reason: String },

    /// External command could not be started.
    #[error("Failed to start {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// Registry fixture file could not be loaded.
    #[error("Invalid registry fixture {path}: {message}")]
    Fixture { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for dotnet-detect operations.
pub type Result<T> = std::result::Result<T, DetectError>;
