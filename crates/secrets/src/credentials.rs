//! Credential extraction for cloud service sessions

use crate::resolver::SecretsResolver;
use indexmap::IndexMap;
use std::sync::Arc;
use stratum_core::{
    CredentialSource, EnvironmentDetector, Error, Layer, Result, SecretOrigin, ServiceCredentials,
};

/// Issues per-service credentials from resolved secrets.
///
/// Credentials for a service are the resolved keys carrying the
/// `<service>-` prefix, with the prefix stripped: `s3-access-key-id`
/// becomes the field `access-key-id` of the `s3` credentials. Built on the
/// resolver so that cross-layer sharing applies to credentials exactly as it
/// does to every other secret; SDK wrappers consume this surface and never
/// talk to an origin directly.
pub struct CredentialSessionFactory {
    resolver: SecretsResolver,
}

impl CredentialSessionFactory {
    pub fn new(detector: Arc<dyn EnvironmentDetector>, origin: Arc<dyn SecretOrigin>) -> Self {
        Self {
            resolver: SecretsResolver::new(detector, origin),
        }
    }
}

impl CredentialSource for CredentialSessionFactory {
    fn credentials(&self, service: &str, layer: Layer) -> Result<ServiceCredentials> {
        let resolved = self.resolver.resolve(layer)?;
        let prefix = format!("{service}-");

        let mut fields: IndexMap<String, String> = IndexMap::new();
        for (key, value) in resolved.iter() {
            if let Some(field) = key.strip_prefix(&prefix) {
                if !field.is_empty() {
                    fields.insert(field.to_string(), value.clone());
                }
            }
        }

        if fields.is_empty() {
            return Err(Error::service_not_found(
                service,
                layer,
                format!(
                    "no '{prefix}*' keys among {} resolved secrets",
                    resolved.len()
                ),
            ));
        }

        tracing::debug!(
            service = %service,
            layer = %layer,
            fields = fields.len(),
            "issued service credentials"
        );
        Ok(ServiceCredentials::from_map(fields))
    }
}
