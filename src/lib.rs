//! helm3-step - Install Helm 3 chart releases from declarative bundle steps.
//!
//! A step payload names a release, a chart, value overrides, repositories to
//! register first, and secret keys to capture once the release is installed.
//! This crate turns that payload into `helm3` invocations, runs them with
//! streamed output, and writes the captured values out.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Payload parsing and validation
//! - [`error`] - Error types and result aliases
//! - [`helm`] - Argument construction and repository registration
//! - [`install`] - The install pipeline
//! - [`outputs`] - Secret lookup and output delivery
//! - [`secrets`] - Masking of secret values in rendered command lines
//! - [`shell`] - External command execution
//! - [`testing`] - In-memory collaborators for tests
//!
//! # Example
//!
//! ```
//! use helm3_step::install::Installer;
//! use helm3_step::testing::{MemoryOutputSink, MemorySecretStore, RecordingRunner};
//!
//! let payload = b"
//! install:
//!   - helm3:
//!       name: myrel
//!       chart: stable/nginx
//!       version: 1.2.3
//!       wait: true
//!       set: {b: '2', a: '1'}
//! ";
//!
//! let mut runner = RecordingRunner::new();
//! let store = MemorySecretStore::new();
//! let mut sink = MemoryOutputSink::new();
//! Installer::new(&mut runner, &store, &mut sink).install(payload).unwrap();
//!
//! assert_eq!(
//!     runner.commands(),
//!     vec!["install myrel stable/nginx --version 1.2.3 --wait --set a=1 --set b=2"]
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod helm;
pub mod install;
pub mod outputs;
pub mod secrets;
pub mod shell;
pub mod testing;

pub use error::{InstallError, Result};
