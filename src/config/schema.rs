//! Payload schema definitions.
//!
//! This module contains the struct definitions that map to the YAML
//! payload handed to the `install` action.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root of an install payload.
///
/// ```yaml
/// install:
///   - helm3:
///       name: mysql
///       chart: stable/mysql
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallAction {
    /// Declared steps; a valid action has exactly one.
    #[serde(rename = "install", default)]
    pub steps: Vec<StepEnvelope>,
}

/// Wrapper that names the mixin a step belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepEnvelope {
    pub helm3: InstallStep,
}

/// One chart install.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallStep {
    /// Human readable description, used for logging only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target namespace for the release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Release name.
    pub name: String,

    /// Chart reference: name, repo/name, or path.
    pub chart: String,

    /// Chart version constraint, kept exactly as written (`1.10` stays `1.10`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Allow replacing an existing release of the same name.
    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,

    /// Allow pre-release chart versions.
    #[serde(skip_serializing_if = "is_false")]
    pub devel: bool,

    /// Block until resources are ready.
    #[serde(skip_serializing_if = "is_false")]
    pub wait: bool,

    /// Inline value overrides. Emitted in key order.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub set: HashMap<String, String>,

    /// Value files, applied in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Repositories to register before installing.
    #[serde(rename = "repos", skip_serializing_if = "HashMap::is_empty")]
    pub repositories: HashMap<String, RepositoryEntry>,

    /// Values to capture after a successful install.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<OutputDeclaration>,
}

impl InstallStep {
    /// Namespace with empty strings treated as unset.
    pub fn namespace(&self) -> Option<&str> {
        non_empty(&self.namespace)
    }

    /// Version with empty strings treated as unset.
    pub fn version(&self) -> Option<&str> {
        non_empty(&self.version)
    }
}

/// A chart repository to register with `repo add`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryEntry {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cafile: Option<String>,

    /// Client certificate; only used together with `keyfile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certfile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyfile: Option<String>,

    /// Basic auth user; only used together with `password`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl RepositoryEntry {
    pub fn cafile(&self) -> Option<&str> {
        non_empty(&self.cafile)
    }

    /// Certificate and key, only when both are present.
    pub fn tls_pair(&self) -> Option<(&str, &str)> {
        non_empty(&self.certfile).zip(non_empty(&self.keyfile))
    }

    /// Username and password, only when both are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        non_empty(&self.username).zip(non_empty(&self.password))
    }
}

/// A value to read from a secret once the release is installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDeclaration {
    /// Destination name.
    pub name: String,

    /// Secret resource name.
    pub secret: String,

    /// Field within the secret.
    pub key: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_false(v: &bool) -> bool {
    !v
}
