//! Error types for helm3-step operations.
//!
//! This module defines [`InstallError`], the single error type returned by
//! the install pipeline, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every variant carries the repository, output, or command line involved
//! - Nothing is retried; the first error aborts the pipeline
//! - Opaque causes from collaborators travel as `anyhow::Error`

use std::fmt;
use thiserror::Error;

/// Core error type for the install pipeline.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Payload could not be parsed or does not describe exactly one step.
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// A repository URL was declared without a name.
    #[error("Empty repository name for url '{url}'")]
    EmptyRepositoryName { url: String },

    /// Adding a chart repository failed.
    #[error("Unable to add the requested repository '{name}': {source}")]
    RepositoryAddFailed {
        name: String,
        #[source]
        source: Box<InstallError>,
    },

    /// The external process could not be started.
    #[error("Could not execute command, {command}: {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external process started but did not exit cleanly.
    #[error("Command {termination}: {command}")]
    ExecutionFailed {
        command: String,
        termination: Termination,
    },

    /// A declared output could not be read from its secret.
    #[error("Unable to resolve output '{output}': {source}")]
    OutputResolutionFailed {
        output: String,
        #[source]
        source: anyhow::Error,
    },

    /// A resolved output could not be handed to the output sink.
    #[error("Unable to write output '{output}': {source}")]
    OutputWriteFailed {
        output: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallError {
    /// Shorthand for a [`InstallError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        InstallError::Configuration {
            message: message.into(),
        }
    }
}

/// How a failed process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited with a non-zero code.
    Code(i32),

    /// Killed by a signal (unix only).
    Signal(i32),

    /// Neither a code nor a signal was reported.
    Unknown,
}

impl Termination {
    /// Classify a finished process status.
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signal(signal);
            }
        }
        Termination::Unknown
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Code(code) => write!(f, "exited with code {}", code),
            Termination::Signal(signal) => write!(f, "terminated by signal {}", signal),
            Termination::Unknown => write!(f, "terminated abnormally"),
        }
    }
}

/// Result type alias for install operations.
pub type Result<T> = std::result::Result<T, InstallError>;
