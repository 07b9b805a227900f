//! The install pipeline.
//!
//! Parse the payload, register repositories, run `install`, then capture
//! outputs. Each stage runs only if the previous one succeeded.

use crate::config::{parse_install_action, validate, InstallStep};
use crate::error::Result;
use crate::helm::{install_invocation, register_repositories, HELM_BINARY};
use crate::outputs::{extract_outputs, OutputSink, SecretStore};
use crate::shell::CommandRunner;

/// Runs one install step against its collaborators.
pub struct Installer<'a> {
    binary: String,
    runner: &'a mut dyn CommandRunner,
    secrets: &'a dyn SecretStore,
    sink: &'a mut dyn OutputSink,
}

impl<'a> Installer<'a> {
    /// Create an installer that invokes the default `helm3` binary.
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        secrets: &'a dyn SecretStore,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            binary: HELM_BINARY.to_string(),
            runner,
            secrets,
            sink,
        }
    }

    /// Use a different helm executable (name or path).
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Install the single step described by `payload`.
    ///
    /// # Errors
    ///
    /// The first error encountered; see [`crate::error::InstallError`].
    pub fn install(&mut self, payload: &[u8]) -> Result<()> {
        let step = parse_install_action(payload)?;
        validate(&step)?;
        self.install_step(&step)
    }

    /// Install an already parsed and validated step.
    pub fn install_step(&mut self, step: &InstallStep) -> Result<()> {
        match &step.description {
            Some(description) => tracing::info!("{}", description),
            None => tracing::info!("Installing release '{}' from '{}'", step.name, step.chart),
        }

        register_repositories(&mut *self.runner, &self.binary, step)?;

        let invocation = install_invocation(&self.binary, step);
        self.runner.run(&invocation)?;

        extract_outputs(step, self.secrets, &mut *self.sink)
    }
}
