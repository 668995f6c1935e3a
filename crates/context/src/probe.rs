//! Detection of the active execution context

use std::path::PathBuf;
use stratum_core::constants::{
    SERVICE_ACCOUNT_DIR, SERVICE_ACCOUNT_NAMESPACE_FILE, SERVICE_ACCOUNT_TOKEN_FILE,
};
use stratum_core::{Error, ExecutionContext, Result};

/// Probes the cluster credential mount to decide the execution context.
///
/// Every cluster-managed pod carries a service account mount with a token
/// file; a workstation is guaranteed not to. The probe is a cheap existence
/// check with no side effects and is safe to call repeatedly; absence of the
/// mount is a normal "local" result, never an error.
#[derive(Debug, Clone)]
pub struct ContextProbe {
    mount_dir: PathBuf,
}

impl ContextProbe {
    /// Probe the well-known service account mount
    #[must_use]
    pub fn new() -> Self {
        Self {
            mount_dir: PathBuf::from(SERVICE_ACCOUNT_DIR),
        }
    }

    /// Probe a non-standard mount directory.
    ///
    /// Test hook, and an escape hatch for pods with relocated credential
    /// mounts.
    #[must_use]
    pub fn with_mount_dir(mount_dir: impl Into<PathBuf>) -> Self {
        Self {
            mount_dir: mount_dir.into(),
        }
    }

    #[must_use]
    pub fn is_in_cluster(&self) -> bool {
        let in_cluster = self.mount_dir.join(SERVICE_ACCOUNT_TOKEN_FILE).is_file();
        if in_cluster {
            tracing::debug!("detected in-cluster execution");
        } else {
            tracing::debug!("detected local execution (dev machine)");
        }
        in_cluster
    }

    #[must_use]
    pub fn context(&self) -> ExecutionContext {
        if self.is_in_cluster() {
            ExecutionContext::Cluster
        } else {
            ExecutionContext::Local
        }
    }

    /// Namespace the current pod is running in.
    ///
    /// Only meaningful in-cluster; a missing or empty namespace file inside a
    /// pod indicates a broken mount and is a configuration error.
    pub fn current_namespace(&self) -> Result<String> {
        let path = self.mount_dir.join(SERVICE_ACCOUNT_NAMESPACE_FILE);
        let namespace = std::fs::read_to_string(&path).map_err(|e| {
            Error::configuration(format!(
                "cannot read namespace from {}: {e}",
                path.display()
            ))
        })?;
        let namespace = namespace.trim();
        if namespace.is_empty() {
            return Err(Error::configuration(format!(
                "namespace file {} is empty",
                path.display()
            )));
        }
        tracing::debug!(namespace = %namespace, "detected namespace from service account");
        Ok(namespace.to_string())
    }
}

impl Default for ContextProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the execution context with the default probe
#[must_use]
pub fn is_in_cluster() -> bool {
    ContextProbe::new().is_in_cluster()
}
