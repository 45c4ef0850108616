//! Error types for relint operations.
//!
//! This module defines [`RelintError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RelintError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RelintError::Other`) for unexpected errors
//! - A single bad rule is never an error at this level: the compiler drops it
//!   and keeps the rest of the batch

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for relint operations.
#[derive(Debug, Error)]
pub enum RelintError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A rule entry could not be compiled.
    #[error("Invalid rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    /// An edit list could not be applied to the text it was computed for.
    #[error("Cannot apply edit at {start}..{end}: {message}")]
    InvalidEdit {
        start: usize,
        end: usize,
        message: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for relint operations.
pub type Result<T> = std::result::Result<T, RelintError>;
