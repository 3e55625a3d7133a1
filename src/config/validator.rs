//! Configuration validation rules.
//!
//! - Option lists must not contain blank or duplicate entries
//! - An output directory, when given, must not be empty

use crate::config::schema::EcaConfig;
use crate::error::{EcaError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Config key the error belongs to
    pub key: String,
}

impl ValidationError {
    fn new(rule: &str, key: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            key: key.to_string(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &EcaConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_list("no_reason_options", &config.no_reason_options));
    errors.extend(validate_list("reference_documents", &config.reference_documents));

    if let Some(dir) = &config.settings.output_dir {
        if dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "empty-output-dir",
                "settings.output_dir",
                "settings.output_dir must not be empty".to_string(),
            ));
        }
    }

    errors
}

fn validate_list(key: &str, values: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, value) in values.iter().enumerate() {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            errors.push(ValidationError::new(
                "empty-option",
                key,
                format!("{} entry {} is blank", key, i + 1),
            ));
        } else if !seen.insert(trimmed.to_lowercase()) {
            errors.push(ValidationError::new(
                "duplicate-option",
                key,
                format!("{} lists '{}' more than once", key, trimmed),
            ));
        }
    }

    errors
}

/// Validate and return a single error joining every message.
pub fn validate(config: &EcaConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(EcaError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
