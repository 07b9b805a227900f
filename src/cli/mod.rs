//! Command-line interface for helm3-step.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, InstallArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, InstallCommand};
