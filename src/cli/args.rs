//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::helm::HELM_BINARY;
use crate::outputs::{DEFAULT_KUBECONFIG, DEFAULT_OUTPUTS_DIR};

/// helm3-step - Install Helm 3 chart releases from bundle steps.
#[derive(Debug, Parser)]
#[command(name = "helm3-step")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a chart release described by a step payload
    Install(InstallArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Read the payload from this file instead of stdin
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Helm 3 executable, looked up on PATH
    #[arg(long, env = "HELM3_BINARY", default_value = HELM_BINARY)]
    pub helm_binary: String,

    /// Kubeconfig used to read output secrets; several files may be joined
    /// with the path separator, as in KUBECONFIG
    #[arg(long, env = "KUBECONFIG", default_value = DEFAULT_KUBECONFIG)]
    pub kubeconfig: PathBuf,

    /// Directory that receives captured outputs
    #[arg(long, env = "HELM3_OUTPUTS_DIR", default_value = DEFAULT_OUTPUTS_DIR)]
    pub outputs_dir: PathBuf,
}

impl Default for InstallArgs {
    fn default() -> Self {
        Self {
            file: None,
            helm_binary: HELM_BINARY.to_string(),
            kubeconfig: PathBuf::from(DEFAULT_KUBECONFIG),
            outputs_dir: PathBuf::from(DEFAULT_OUTPUTS_DIR),
        }
    }
}
