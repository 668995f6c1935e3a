//! Cluster environment detection from a namespaced config object (cluster-only)

use stratum_context::{ensure_cluster, ContextProbe};
use stratum_core::constants::{
    CLUSTER_CONFIGMAP_KEY, CLUSTER_CONFIGMAP_NAME, CLUSTER_REQUEST_TIMEOUT, STRATUM_ENV_VAR,
};
use stratum_core::{Environment, EnvironmentDetector, Layer, Result};
use stratum_utils::{run_command, SyncEnv};

/// Detects the active environment from the `stratum-config` object in the
/// layer's own namespace.
///
/// An absent object, an unreachable API, or an empty value all resolve to
/// the default track; running a pod with no declared environment is a normal
/// state during incremental environment setup.
#[derive(Debug)]
pub struct ClusterEnvironmentDetector;

impl ClusterEnvironmentDetector {
    pub fn new(probe: &ContextProbe) -> Result<Self> {
        ensure_cluster(probe)?;
        tracing::debug!("initialized cluster environment detector");
        Ok(Self)
    }

    fn environment_from_config_object(layer: Layer) -> Option<Environment> {
        let jsonpath = format!("jsonpath={{.data.{CLUSTER_CONFIGMAP_KEY}}}");
        let timeout = format!("--request-timeout={CLUSTER_REQUEST_TIMEOUT}");
        let output = run_command(
            "kubectl",
            &[
                "get",
                "configmap",
                CLUSTER_CONFIGMAP_NAME,
                "-n",
                layer.namespace(),
                "-o",
                &jsonpath,
                &timeout,
            ],
        )
        .ok()?;

        if !output.success() {
            tracing::debug!(
                namespace = %layer.namespace(),
                "no {CLUSTER_CONFIGMAP_NAME} object readable in namespace"
            );
            return None;
        }

        let name = output.stdout.trim();
        if name.is_empty() {
            None
        } else {
            tracing::debug!(environment = %name, namespace = %layer.namespace(), "detected environment");
            Some(Environment::new(name))
        }
    }
}

impl EnvironmentDetector for ClusterEnvironmentDetector {
    fn get_environment(&self, layer: Layer) -> Result<Environment> {
        // Explicit process override beats any discovered source
        if let Some(name) = SyncEnv::var(STRATUM_ENV_VAR).filter(|v| !v.is_empty()) {
            tracing::debug!(environment = %name, "environment taken from {STRATUM_ENV_VAR}");
            return Ok(Environment::new(name));
        }

        Ok(Self::environment_from_config_object(layer).unwrap_or_default())
    }
}
