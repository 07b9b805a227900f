//! Helm command construction and repository registration.
//!
//! - [`command`] - Pure builders for `install` and `repo add` tokens
//! - [`repository`] - Runs `repo add` for every declared repository

pub mod command;
pub mod repository;

pub use command::{
    install_args, install_invocation, repo_add_args, repo_add_invocation, set_args, HELM_BINARY,
};
pub use repository::{register_repositories, repository_invocations};
