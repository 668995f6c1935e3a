//! Cluster secret store origin (cluster-only)

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use stratum_context::{ensure_cluster, ContextProbe};
use stratum_core::constants::{
    CLUSTER_REQUEST_TIMEOUT, CLUSTER_SECRET_SUFFIX, METADATA_KEYS, SHARED_WITH_KEY,
};
use stratum_core::{Environment, Error, Layer, Result, SecretBundle, SecretOrigin};
use stratum_utils::run_command;

/// Reads secret bundles from the cluster secret store.
///
/// Each layer's bundle is the secret object `<layerN>-secrets` in that
/// layer's namespace, with values base64-encoded at rest. A missing object
/// or an unreachable API resolves to an empty bundle; a present object with
/// undecodable content is malformed.
pub struct ClusterSecretOrigin;

impl ClusterSecretOrigin {
    pub fn new(probe: &ContextProbe) -> Result<Self> {
        ensure_cluster(probe)?;
        tracing::debug!("initialized cluster secret origin");
        Ok(Self)
    }
}

impl SecretOrigin for ClusterSecretOrigin {
    fn read(&self, environment: &Environment, layer: Layer) -> Result<SecretBundle> {
        let secret_name = format!("{}{}", layer.short_name(), CLUSTER_SECRET_SUFFIX);
        let timeout = format!("--request-timeout={CLUSTER_REQUEST_TIMEOUT}");

        tracing::debug!(
            secret = %secret_name,
            namespace = %layer.namespace(),
            environment = %environment,
            "fetching cluster secret"
        );

        let output = match run_command(
            "kubectl",
            &[
                "get",
                "secret",
                &secret_name,
                "-n",
                layer.namespace(),
                "-o",
                "json",
                &timeout,
            ],
        ) {
            Ok(output) => output,
            Err(error) => {
                tracing::warn!(%error, "cluster secret store unavailable");
                return Ok(SecretBundle::new());
            }
        };

        if !output.success() {
            tracing::debug!(secret = %secret_name, "secret not found, resolving to empty bundle");
            return Ok(SecretBundle::new());
        }

        parse_secret_object(&secret_name, &output.stdout)
    }
}

fn parse_secret_object(secret_name: &str, raw: &str) -> Result<SecretBundle> {
    let doc: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::json(format!("malformed secret object '{secret_name}'"), e))?;

    let mut bundle = SecretBundle::new();
    let Some(data) = doc.get("data").and_then(serde_json::Value::as_object) else {
        return Ok(bundle);
    };

    for (key, encoded) in data {
        let encoded = encoded.as_str().ok_or_else(|| {
            Error::configuration(format!(
                "secret object '{secret_name}': value for '{key}' is not a string"
            ))
        })?;
        let decoded = BASE64.decode(encoded).map_err(|e| {
            Error::configuration(format!(
                "secret object '{secret_name}': value for '{key}' is not valid base64: {e}"
            ))
        })?;
        let value = String::from_utf8(decoded).map_err(|e| {
            Error::configuration(format!(
                "secret object '{secret_name}': value for '{key}' is not valid UTF-8: {e}"
            ))
        })?;

        if key == SHARED_WITH_KEY {
            for name in value.split(',') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let layer = Layer::from_string(name).map_err(|e| {
                    Error::configuration(format!(
                        "secret object '{secret_name}': invalid layer in '{SHARED_WITH_KEY}': {e}"
                    ))
                })?;
                bundle.share_with(layer);
            }
        } else if METADATA_KEYS.contains(&key.as_str()) {
            bundle.insert_metadata(key, value);
        } else {
            bundle.insert(key, value);
        }
    }

    tracing::debug!(secret = %secret_name, keys = bundle.len(), "read cluster bundle");
    Ok(bundle)
}
