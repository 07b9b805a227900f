//! Secret lookup.
//!
//! [`SecretStore`] is the seam between output extraction and the cluster.
//! [`KubeSecretStore`] is the real implementation backed by the Kubernetes
//! API.

use anyhow::{anyhow, Context};
use k8s_openapi::api::core::v1::Secret;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::cell::RefCell;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Default kubeconfig location inside the bundle runtime.
pub const DEFAULT_KUBECONFIG: &str = "/root/.kube/config";

/// Reads single keys out of named secrets.
pub trait SecretStore {
    /// Fetch `key` from secret `secret`.
    ///
    /// `namespace` of `None` means the store's default namespace.
    fn secret_value(&self, namespace: Option<&str>, secret: &str, key: &str)
        -> anyhow::Result<Vec<u8>>;
}

/// Secret store backed by a Kubernetes cluster.
///
/// The client is built from the kubeconfig on the first lookup, so a step
/// without outputs never needs cluster access.
pub struct KubeSecretStore {
    kubeconfig: PathBuf,
    runtime: tokio::runtime::Runtime,
    client: RefCell<Option<(Client, String)>>,
}

impl KubeSecretStore {
    /// Create a store that will connect using `kubeconfig`.
    ///
    /// Like `KUBECONFIG`, the value may list several files separated by the
    /// platform path separator; they are merged in order.
    pub fn new(kubeconfig: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("couldn't start kubernetes client runtime")?;

        Ok(Self {
            kubeconfig: kubeconfig.into(),
            runtime,
            client: RefCell::new(None),
        })
    }

    /// Kubeconfig path list this store reads.
    pub fn kubeconfig(&self) -> &Path {
        &self.kubeconfig
    }

    fn connect(&self) -> anyhow::Result<(Client, String)> {
        if let Some(cached) = self.client.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let kubeconfig = read_kubeconfigs(self.kubeconfig.as_os_str())
            .context("couldn't get kubernetes client")?;

        let connected = self.runtime.block_on(async {
            let config =
                Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
            let namespace = config.default_namespace.clone();
            let client = Client::try_from(config)?;
            anyhow::Ok((client, namespace))
        });
        let connected = connected.context("couldn't get kubernetes client")?;

        tracing::debug!(
            "Connected to cluster using {} (default namespace '{}')",
            self.kubeconfig.display(),
            connected.1
        );
        *self.client.borrow_mut() = Some(connected.clone());
        Ok(connected)
    }
}

impl SecretStore for KubeSecretStore {
    fn secret_value(
        &self,
        namespace: Option<&str>,
        secret: &str,
        key: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let (client, default_namespace) = self.connect()?;
        let namespace = namespace.unwrap_or(&default_namespace);

        let api: Api<Secret> = Api::namespaced(client, namespace);
        let resource = self
            .runtime
            .block_on(api.get(secret))
            .with_context(|| format!("couldn't get secret '{}' in namespace '{}'", secret, namespace))?;

        secret_key(&resource, key)
            .ok_or_else(|| anyhow!("secret '{}' has no key '{}'", secret, key))
    }
}

/// Read every file in a path list and merge them, earlier files winning.
fn read_kubeconfigs(paths: &OsStr) -> anyhow::Result<Kubeconfig> {
    let mut merged: Option<Kubeconfig> = None;
    for path in env::split_paths(paths).filter(|p| !p.as_os_str().is_empty()) {
        let next = Kubeconfig::read_from(&path)
            .with_context(|| format!("reading kubeconfig {}", path.display()))?;
        merged = Some(match merged {
            Some(config) => config.merge(next)?,
            None => next,
        });
    }
    merged.ok_or_else(|| anyhow!("no kubeconfig path given"))
}

/// Decoded value of `key` in a fetched secret.
fn secret_key(secret: &Secret, key: &str) -> Option<Vec<u8>> {
    if let Some(value) = secret.data.as_ref().and_then(|data| data.get(key)) {
        return Some(value.0.clone());
    }
    secret
        .string_data
        .as_ref()
        .and_then(|data| data.get(key))
        .map(|value| value.clone().into_bytes())
}
