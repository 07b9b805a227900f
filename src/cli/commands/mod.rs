//! CLI command implementations.

pub mod dispatcher;
pub mod install;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use install::InstallCommand;
