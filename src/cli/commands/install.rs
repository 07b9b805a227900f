//! Install command implementation.

use crate::cli::args::InstallArgs;
use crate::config::read_payload;
use crate::error::Result;
use crate::install::Installer;
use crate::outputs::{FileOutputSink, KubeSecretStore};
use crate::shell::StreamingRunner;

use super::dispatcher::{Command, CommandResult};

/// The install command: read a payload and run it against the real helm,
/// cluster, and outputs directory.
pub struct InstallCommand {
    args: InstallArgs,
}

impl InstallCommand {
    pub fn new(args: InstallArgs) -> Self {
        Self { args }
    }

    pub fn args(&self) -> &InstallArgs {
        &self.args
    }
}

impl Command for InstallCommand {
    fn execute(&self) -> Result<CommandResult> {
        let payload = read_payload(self.args.file.as_deref())?;

        let store = KubeSecretStore::new(&self.args.kubeconfig)?;
        let mut sink = FileOutputSink::new(&self.args.outputs_dir);
        let mut runner = StreamingRunner::new(std::io::stdout(), std::io::stderr());

        Installer::new(&mut runner, &store, &mut sink)
            .with_binary(&self.args.helm_binary)
            .install(&payload)?;

        Ok(CommandResult::success())
    }
}
