//! Error types for the assessment wizard.
//!
//! This module defines [`EcaError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing or inconsistent form input is not an error: each step form
//!   reports it through `is_valid` / `problems` and the wizard refuses to
//!   continue until it is fixed
//! - Use `EcaError` for failures the caller must report (bad files, export)
//! - Use `anyhow::Error` (via `EcaError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wizard operations.
#[derive(Debug, Error)]
pub enum EcaError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A change record file could not be read as a record.
    #[error("Failed to parse change record at {path}: {message}")]
    RecordParseError { path: PathBuf, message: String },

    /// A complexity score outside the 1..=3 range.
    #[error("Invalid {criterion} score {value}: expected 1, 2 or 3")]
    InvalidScore { criterion: String, value: u8 },

    /// A step identifier that names no wizard step.
    #[error("Unknown step: {id}")]
    UnknownStep { id: String },

    /// A step could not be completed without interactive input.
    #[error("Step '{step}' is incomplete: {}", .problems.join("; "))]
    StepIncomplete { step: String, problems: Vec<String> },

    /// Writing the export document failed.
    #[error("Export to {path} failed: {message}")]
    ExportFailed { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for wizard operations.
pub type Result<T> = std::result::Result<T, EcaError>;
