//! Argument construction for helm invocations.
//!
//! Builders here are pure: they take the step model and return owned token
//! lists. Nothing is validated beyond what is needed to decide which flags to
//! emit; the helm binary reports malformed charts or versions itself.

use crate::config::schema::{InstallStep, RepositoryEntry};
use crate::error::{InstallError, Result};
use crate::shell::Invocation;

/// Default name of the helm 3 executable.
pub const HELM_BINARY: &str = "helm3";

/// Build the tokens for `install`.
///
/// `install <name> <chart> [--namespace N] [--version V] [--replace] [--wait]
/// [--devel] [--values F]* [--set K=V]*`
///
/// `--values` keeps declaration order because later files override earlier
/// ones. `--set` is emitted in sorted key order so identical maps always
/// render identically. Set values are passed through verbatim: an embedded
/// `=`, comma, or whitespace is not escaped and helm interprets it as it
/// sees fit.
pub fn install_args(step: &InstallStep) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        step.name.clone(),
        step.chart.clone(),
    ];

    if let Some(namespace) = step.namespace() {
        args.extend(["--namespace".to_string(), namespace.to_string()]);
    }

    if let Some(version) = step.version() {
        args.extend(["--version".to_string(), version.to_string()]);
    }

    if step.replace {
        args.push("--replace".to_string());
    }

    if step.wait {
        args.push("--wait".to_string());
    }

    if step.devel {
        args.push("--devel".to_string());
    }

    for values in &step.values {
        args.extend(["--values".to_string(), values.clone()]);
    }

    args.extend(set_args(step));
    args
}

/// Render `--set key=value` pairs sorted by key.
pub fn set_args(step: &InstallStep) -> Vec<String> {
    let mut keys: Vec<&String> = step.set.keys().collect();
    keys.sort();

    keys.into_iter()
        .flat_map(|key| ["--set".to_string(), format!("{}={}", key, step.set[key])])
        .collect()
}

/// Build the tokens for `repo add`.
///
/// `repo add <name> <url> [--cert-file C --key-file K] [--ca-file A]
/// [--username U --password P]`
///
/// A half-specified TLS or credential pair emits nothing for that pair.
///
/// # Errors
///
/// Returns `EmptyRepositoryName` when a URL is given without a name.
pub fn repo_add_args(name: &str, entry: &RepositoryEntry) -> Result<Vec<String>> {
    if name.is_empty() && !entry.url.is_empty() {
        return Err(InstallError::EmptyRepositoryName {
            url: entry.url.clone(),
        });
    }

    let mut args = vec![
        "repo".to_string(),
        "add".to_string(),
        name.to_string(),
        entry.url.clone(),
    ];

    if let Some((certfile, keyfile)) = entry.tls_pair() {
        args.extend([
            "--cert-file".to_string(),
            certfile.to_string(),
            "--key-file".to_string(),
            keyfile.to_string(),
        ]);
    }

    if let Some(cafile) = entry.cafile() {
        args.extend(["--ca-file".to_string(), cafile.to_string()]);
    }

    if let Some((username, password)) = entry.credentials() {
        args.extend([
            "--username".to_string(),
            username.to_string(),
            "--password".to_string(),
            password.to_string(),
        ]);
    }

    Ok(args)
}

/// Install invocation for `binary`.
pub fn install_invocation(binary: &str, step: &InstallStep) -> Invocation {
    Invocation::new(binary, install_args(step))
}

/// `repo add` invocation for `binary`, with the password token masked on
/// display.
pub fn repo_add_invocation(binary: &str, name: &str, entry: &RepositoryEntry) -> Result<Invocation> {
    let args = repo_add_args(name, entry)?;
    // Credentials come last, so the password is the final token.
    let password_index = entry.credentials().map(|_| args.len() - 1);
    let invocation = Invocation::new(binary, args);
    Ok(match password_index {
        Some(index) => invocation.redacting(index),
        None => invocation,
    })
}
