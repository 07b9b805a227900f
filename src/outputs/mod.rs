//! Capturing step outputs from cluster secrets.
//!
//! - [`store`] - [`SecretStore`] seam and the Kubernetes-backed store
//! - [`sink`] - [`OutputSink`] seam and the file-backed sink
//! - [`extractor`] - Resolves declared outputs in order

pub mod extractor;
pub mod sink;
pub mod store;

pub use extractor::extract_outputs;
pub use sink::{FileOutputSink, OutputSink, DEFAULT_OUTPUTS_DIR};
pub use store::{KubeSecretStore, SecretStore, DEFAULT_KUBECONFIG};
