//! Chart repository registration.

use crate::config::schema::InstallStep;
use crate::error::{InstallError, Result};
use crate::helm::command::repo_add_invocation;
use crate::shell::{CommandRunner, Invocation};

/// Build one `repo add` invocation per declared repository, sorted by name.
///
/// All invocations are built before any is run, so a naming error means no
/// repository is added at all.
pub fn repository_invocations(binary: &str, step: &InstallStep) -> Result<Vec<(String, Invocation)>> {
    let mut names: Vec<&String> = step.repositories.keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let entry = &step.repositories[name];
            repo_add_invocation(binary, name, entry).map(|invocation| (name.clone(), invocation))
        })
        .collect()
}

/// Add every repository the step declares, one after another.
///
/// # Errors
///
/// Returns `EmptyRepositoryName` before anything runs if a URL has no name,
/// and `RepositoryAddFailed` for the first repository whose `repo add`
/// fails. Later repositories are not attempted.
pub fn register_repositories(
    runner: &mut dyn CommandRunner,
    binary: &str,
    step: &InstallStep,
) -> Result<()> {
    for (name, invocation) in repository_invocations(binary, step)? {
        tracing::info!("Adding repo {} {}", name, step.repositories[&name].url);

        runner
            .run(&invocation)
            .map_err(|source| InstallError::RepositoryAddFailed {
                name: name.clone(),
                source: Box::new(source),
            })?;
    }

    Ok(())
}
