//! Secret bundle and resolved secret mappings

use crate::constants::METADATA_KEYS;
use crate::types::Layer;
use indexmap::IndexMap;

/// The raw key/value secret payload stored for one (environment, layer) pair.
///
/// Keys are lowercase hyphen-separated names (`redis-client-host`). The
/// `shared_with` attribute declares which other layers may read this bundle;
/// metadata entries (description, created, status) travel with the bundle but
/// are never exported. A bundle is immutable once read within a resolution
/// call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretBundle {
    values: IndexMap<String, String>,
    shared_with: Vec<Layer>,
    metadata: IndexMap<String, String>,
}

impl SecretBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a secret value, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of secret values (metadata excluded)
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.values.iter()
    }

    #[must_use]
    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Layers this bundle is explicitly shared with
    #[must_use]
    pub fn shared_with(&self) -> &[Layer] {
        &self.shared_with
    }

    /// Declare another layer as a reader of this bundle
    pub fn share_with(&mut self, layer: Layer) {
        if !self.shared_with.contains(&layer) {
            self.shared_with.push(layer);
        }
    }

    #[must_use]
    pub fn is_shared_with(&self, layer: Layer) -> bool {
        self.shared_with.contains(&layer)
    }

    /// Attach a non-secret annotation (never exported)
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    /// Merge another bundle into this one.
    ///
    /// Later values overlay earlier ones; sharing declarations union.
    pub fn absorb(&mut self, other: SecretBundle) {
        self.values.extend(other.values);
        for layer in other.shared_with {
            self.share_with(layer);
        }
        self.metadata.extend(other.metadata);
    }
}

/// The merged mapping produced by the resolver for one requesting layer.
///
/// Contains the requester's own keys plus keys from every bundle shared into
/// it, with metadata stripped. Recomputed on every resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSecrets(IndexMap<String, String>);

impl ResolvedSecrets {
    #[must_use]
    pub fn from_map(mut map: IndexMap<String, String>) -> Self {
        map.retain(|key, _| !METADATA_KEYS.contains(&key.as_str()));
        Self(map)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

/// Credential fields for one service, extracted from resolved secrets.
///
/// Field names have the service prefix stripped: the resolved key
/// `s3-access-key-id` becomes the field `access-key-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCredentials(IndexMap<String, String>);

impl ServiceCredentials {
    #[must_use]
    pub fn from_map(map: IndexMap<String, String>) -> Self {
        Self(map)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_overlays_values_and_unions_sharing() {
        let mut first = SecretBundle::new();
        first.insert("redis-host", "a");
        first.insert("redis-port", "6379");
        first.share_with(Layer::Applications);

        let mut second = SecretBundle::new();
        second.insert("redis-host", "b");
        second.share_with(Layer::Applications);
        second.share_with(Layer::GlobalServices);

        first.absorb(second);
        assert_eq!(first.get("redis-host"), Some("b"));
        assert_eq!(first.get("redis-port"), Some("6379"));
        assert_eq!(
            first.shared_with(),
            &[Layer::Applications, Layer::GlobalServices]
        );
    }

    #[test]
    fn resolved_secrets_strip_metadata_keys() {
        let mut map = IndexMap::new();
        map.insert("api-key".to_string(), "y".to_string());
        map.insert("shared_with".to_string(), "layer0".to_string());
        map.insert("description".to_string(), "test".to_string());

        let resolved = ResolvedSecrets::from_map(map);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get("api-key"), Some("y"));
        assert!(!resolved.contains_key("shared_with"));
        assert!(!resolved.contains_key("description"));
    }

    #[test]
    fn bundle_sharing_is_deduplicated() {
        let mut bundle = SecretBundle::new();
        bundle.share_with(Layer::TenantInfra);
        bundle.share_with(Layer::TenantInfra);
        assert_eq!(bundle.shared_with(), &[Layer::TenantInfra]);
        assert!(bundle.is_shared_with(Layer::TenantInfra));
        assert!(!bundle.is_shared_with(Layer::GlobalInfra));
    }
}
