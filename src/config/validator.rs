//! Install step validation rules.
//!
//! This module validates a parsed step before anything is executed:
//! - Release name and chart must be non-empty
//! - Output names must be non-empty and unique

use crate::config::schema::InstallStep;
use crate::error::{InstallError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Output name if error is output-specific
    pub output: Option<String>,
}

/// Validate a step and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_step(step: &InstallStep) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if step.name.trim().is_empty() {
        errors.push(ValidationError {
            rule: "missing-name".to_string(),
            message: "Step must have a non-empty 'name'".to_string(),
            output: None,
        });
    }

    if step.chart.trim().is_empty() {
        errors.push(ValidationError {
            rule: "missing-chart".to_string(),
            message: "Step must have a non-empty 'chart'".to_string(),
            output: None,
        });
    }

    errors.extend(validate_outputs(step));
    errors
}

fn validate_outputs(step: &InstallStep) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, output) in step.outputs.iter().enumerate() {
        if output.name.is_empty() {
            errors.push(ValidationError {
                rule: "missing-output-name".to_string(),
                message: format!("Output #{} must have a non-empty 'name'", index + 1),
                output: None,
            });
        } else if !seen.insert(output.name.as_str()) {
            errors.push(ValidationError {
                rule: "duplicate-output".to_string(),
                message: format!("Output '{}' is declared more than once", output.name),
                output: Some(output.name.clone()),
            });
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `Configuration` if any validation rules fail.
pub fn validate(step: &InstallStep) -> Result<()> {
    let errors = validate_step(step);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(InstallError::configuration(messages.join("; ")))
    }
}
