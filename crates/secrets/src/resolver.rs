//! Cross-layer secret resolution under the sharing policy

use indexmap::IndexMap;
use std::sync::Arc;
use stratum_core::{EnvironmentDetector, Layer, ResolvedSecrets, Result, SecretOrigin};

/// Merges a layer's own secrets with any bundles shared into it.
///
/// Isolation is the default: a layer sees another layer's keys only when
/// that bundle explicitly lists it under `shared_with`. The requester's own
/// bundle is always included and always wins on key collisions, so a layer's
/// declared values are never silently shadowed by shared material. Shared
/// bundles merge in increasing layer-number order for determinism.
pub struct SecretsResolver {
    detector: Arc<dyn EnvironmentDetector>,
    origin: Arc<dyn SecretOrigin>,
}

impl SecretsResolver {
    pub fn new(detector: Arc<dyn EnvironmentDetector>, origin: Arc<dyn SecretOrigin>) -> Self {
        Self { detector, origin }
    }

    /// Resolve every secret the requesting layer may read.
    ///
    /// Bundles are re-read on every call; vault contents may change between
    /// calls, for example after an external decryption.
    pub fn resolve(&self, layer: Layer) -> Result<ResolvedSecrets> {
        let environment = self.detector.get_environment(layer)?;

        let own = self.origin.read(&environment, layer)?;

        let mut merged: IndexMap<String, String> = IndexMap::new();
        for other in Layer::all() {
            if other == layer {
                continue;
            }
            let candidate = self.origin.read(&environment, other)?;
            if candidate.is_empty() {
                continue;
            }
            if !candidate.is_shared_with(layer) {
                tracing::debug!(
                    owner = %other,
                    requester = %layer,
                    "bundle not shared with requester, skipping"
                );
                continue;
            }
            for (key, value) in candidate.iter() {
                merged.insert(key.clone(), value.clone());
            }
        }

        // Own bundle overlays last so self wins over anything shared in
        for (key, value) in own.iter() {
            merged.insert(key.clone(), value.clone());
        }

        let resolved = ResolvedSecrets::from_map(merged);
        tracing::debug!(
            layer = %layer,
            environment = %environment,
            keys = resolved.len(),
            "resolved secrets"
        );
        Ok(resolved)
    }
}
