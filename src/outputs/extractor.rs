//! Output extraction after a successful install.

use crate::config::schema::InstallStep;
use crate::error::{InstallError, Result};
use crate::outputs::sink::OutputSink;
use crate::outputs::store::SecretStore;

/// Resolve every declared output and hand it to `sink`, in order.
///
/// Lookups use the step's namespace. Processing stops at the first failure;
/// outputs already written stay written.
///
/// # Errors
///
/// `OutputResolutionFailed` if a secret or key cannot be read,
/// `OutputWriteFailed` if the sink rejects a value.
pub fn extract_outputs(
    step: &InstallStep,
    store: &dyn SecretStore,
    sink: &mut dyn OutputSink,
) -> Result<()> {
    for output in &step.outputs {
        let value = store
            .secret_value(step.namespace(), &output.secret, &output.key)
            .map_err(|source| InstallError::OutputResolutionFailed {
                output: output.name.clone(),
                source,
            })?;

        sink.write_output(&output.name, &value)
            .map_err(|source| InstallError::OutputWriteFailed {
                output: output.name.clone(),
                source,
            })?;

        tracing::info!(
            "Captured output '{}' from secret '{}' key '{}'",
            output.name,
            output.secret,
            output.key
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputDeclaration;
    use crate::testing::{MemoryOutputSink, MemorySecretStore};

    fn declaration(name: &str, secret: &str, key: &str) -> OutputDeclaration {
        OutputDeclaration {
            name: name.into(),
            secret: secret.into(),
            key: key.into(),
        }
    }

    fn step(outputs: Vec<OutputDeclaration>) -> InstallStep {
        InstallStep {
            namespace: Some("db".into()),
            name: "mysql".into(),
            chart: "stable/mysql".into(),
            outputs,
            ..Default::default()
        }
    }

    #[test]
    fn delivers_outputs_in_order() {
        let store = MemorySecretStore::new()
            .with_secret(Some("db"), "mysql", "root", b"r00t")
            .with_secret(Some("db"), "mysql", "user", b"wp");
        let mut sink = MemoryOutputSink::new();

        extract_outputs(
            &step(vec![
                declaration("user", "mysql", "user"),
                declaration("root", "mysql", "root"),
            ]),
            &store,
            &mut sink,
        )
        .unwrap();

        assert_eq!(
            sink.written(),
            &[
                ("user".to_string(), b"wp".to_vec()),
                ("root".to_string(), b"r00t".to_vec()),
            ]
        );
    }

    #[test]
    fn uses_step_namespace() {
        let store = MemorySecretStore::new().with_secret(Some("other"), "mysql", "root", b"x");
        let mut sink = MemoryOutputSink::new();

        let err = extract_outputs(
            &step(vec![declaration("root", "mysql", "root")]),
            &store,
            &mut sink,
        )
        .unwrap_err();

        assert!(matches!(err, InstallError::OutputResolutionFailed { .. }));
    }

    #[test]
    fn stops_at_first_unresolvable_output() {
        let store = MemorySecretStore::new()
            .with_secret(Some("db"), "mysql", "root", b"r00t")
            .with_secret(Some("db"), "mysql", "user", b"wp");
        let mut sink = MemoryOutputSink::new();

        let err = extract_outputs(
            &step(vec![
                declaration("root", "mysql", "root"),
                declaration("missing", "mysql", "nope"),
                declaration("user", "mysql", "user"),
            ]),
            &store,
            &mut sink,
        )
        .unwrap_err();

        match err {
            InstallError::OutputResolutionFailed { output, .. } => assert_eq!(output, "missing"),
            other => panic!("expected OutputResolutionFailed, got {:?}", other),
        }
        assert_eq!(sink.written(), &[("root".to_string(), b"r00t".to_vec())]);
        assert_eq!(store.lookups(), 2);
    }

    #[test]
    fn sink_failure_is_write_error() {
        let store = MemorySecretStore::new().with_secret(Some("db"), "mysql", "root", b"r00t");
        let mut sink = MemoryOutputSink::new().failing_on("root");

        let err = extract_outputs(
            &step(vec![declaration("root", "mysql", "root")]),
            &store,
            &mut sink,
        )
        .unwrap_err();

        assert!(matches!(err, InstallError::OutputWriteFailed { output, .. } if output == "root"));
    }

    #[test]
    fn no_outputs_touches_nothing() {
        let store = MemorySecretStore::new();
        let mut sink = MemoryOutputSink::new();

        extract_outputs(&step(Vec::new()), &store, &mut sink).unwrap();

        assert_eq!(store.lookups(), 0);
        assert!(sink.written().is_empty());
    }
}
