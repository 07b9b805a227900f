//! Payload reading and parsing.
//!
//! The payload arrives either on stdin or from a file and must describe
//! exactly one install step.

use crate::config::schema::{InstallAction, InstallStep};
use crate::error::{InstallError, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read raw payload bytes from a file, or from stdin when no path is given.
pub fn read_payload(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InstallError::configuration(format!("payload not found: {}", path.display()))
            } else {
                InstallError::Io(e)
            }
        }),
        None => {
            let mut payload = Vec::new();
            std::io::stdin().read_to_end(&mut payload)?;
            Ok(payload)
        }
    }
}

/// Parse payload bytes into the single step they describe.
///
/// # Errors
///
/// Returns `Configuration` if the YAML is malformed or the action does not
/// contain exactly one step.
pub fn parse_install_action(payload: &[u8]) -> Result<InstallStep> {
    let action: InstallAction = serde_yaml::from_slice(payload)
        .map_err(|e| InstallError::configuration(format!("malformed payload: {}", e)))?;

    let count = action.steps.len();
    let mut steps = action.steps.into_iter();
    match (steps.next(), count) {
        (Some(envelope), 1) => {
            tracing::debug!("Parsed install step for release '{}'", envelope.helm3.name);
            Ok(envelope.helm3)
        }
        _ => Err(InstallError::configuration(format!(
            "expected a single step, but got {}",
            count
        ))),
    }
}
