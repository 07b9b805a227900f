//! In-memory collaborators for testing the install pipeline.
//!
//! These capture every interaction for later assertion and never spawn a
//! process or touch a cluster.
//!
//! # Example
//!
//! ```
//! use helm3_step::shell::{CommandRunner, Invocation};
//! use helm3_step::testing::RecordingRunner;
//!
//! let mut runner = RecordingRunner::new().fail_on("install", 1);
//! runner.run(&Invocation::new("helm3", vec!["repo".into(), "add".into()])).unwrap();
//! assert!(runner.run(&Invocation::new("helm3", vec!["install".into()])).is_err());
//! assert_eq!(runner.commands(), vec!["repo add", "install"]);
//! ```

use crate::error::{InstallError, Result, Termination};
use crate::outputs::{OutputSink, SecretStore};
use crate::shell::{CommandRunner, Invocation};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::io;

/// Records invocations instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    failures: Vec<(String, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail, with exit `code`, any invocation whose arguments start with `prefix`.
    pub fn fail_on(mut self, prefix: &str, code: i32) -> Self {
        self.failures.push((prefix.to_string(), code));
        self
    }

    /// Every invocation seen so far, including failed ones.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Arguments of every invocation, space-joined.
    pub fn commands(&self) -> Vec<String> {
        self.invocations.iter().map(Invocation::args_line).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.invocations.push(invocation.clone());

        let line = invocation.args_line();
        match self.failures.iter().find(|(prefix, _)| line.starts_with(prefix.as_str())) {
            Some((_, code)) => Err(InstallError::ExecutionFailed {
                command: invocation.render(&invocation.program),
                termination: Termination::Code(*code),
            }),
            None => Ok(()),
        }
    }
}

/// Secrets held in memory, keyed by namespace, secret, and key.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    values: HashMap<(Option<String>, String, String), Vec<u8>>,
    lookups: Cell<usize>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(
        mut self,
        namespace: Option<&str>,
        secret: &str,
        key: &str,
        value: &[u8],
    ) -> Self {
        self.values.insert(
            (
                namespace.map(str::to_string),
                secret.to_string(),
                key.to_string(),
            ),
            value.to_vec(),
        );
        self
    }

    /// Number of lookups attempted, successful or not.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl SecretStore for MemorySecretStore {
    fn secret_value(
        &self,
        namespace: Option<&str>,
        secret: &str,
        key: &str,
    ) -> anyhow::Result<Vec<u8>> {
        self.lookups.set(self.lookups.get() + 1);
        self.values
            .get(&(
                namespace.map(str::to_string),
                secret.to_string(),
                key.to_string(),
            ))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("secret '{}' has no key '{}'", secret, key))
    }
}

/// Collects written outputs in memory.
#[derive(Debug, Default)]
pub struct MemoryOutputSink {
    written: Vec<(String, Vec<u8>)>,
    failing: HashSet<String>,
    calls: usize,
}

impl MemoryOutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes for `name`.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Successfully written outputs, in write order.
    pub fn written(&self) -> &[(String, Vec<u8>)] {
        &self.written
    }

    /// Number of write attempts, successful or not.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl OutputSink for MemoryOutputSink {
    fn write_output(&mut self, name: &str, value: &[u8]) -> io::Result<()> {
        self.calls += 1;
        if self.failing.contains(name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot write '{}'", name),
            ));
        }
        self.written.push((name.to_string(), value.to_vec()));
        Ok(())
    }
}
