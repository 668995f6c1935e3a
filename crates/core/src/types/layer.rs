//! Infrastructure layer definitions

use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the four infrastructure layers of the deployment topology.
///
/// Layers are numbered from 0 (applications) to 3 (foundation
/// infrastructure). Each layer maps 1:1 to a cluster namespace and owns its
/// own secret bundles.
///
/// - `Applications`: user-facing applications, dashboards, frontends
/// - `TenantInfra`: per-customer infrastructure (databases, queues, buckets)
/// - `GlobalServices`: shared business logic and cross-tenant services
/// - `GlobalInfra`: foundation infrastructure shared by everything above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Applications,
    TenantInfra,
    GlobalServices,
    GlobalInfra,
}

impl Layer {
    /// All layers in increasing number order
    #[must_use]
    pub fn all() -> [Layer; 4] {
        [
            Layer::Applications,
            Layer::TenantInfra,
            Layer::GlobalServices,
            Layer::GlobalInfra,
        ]
    }

    /// Layer number (0-3)
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Layer::Applications => 0,
            Layer::TenantInfra => 1,
            Layer::GlobalServices => 2,
            Layer::GlobalInfra => 3,
        }
    }

    /// Cluster namespace owned by this layer
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Layer::Applications => "layer-0-applications",
            Layer::TenantInfra => "layer-1-tenant-infra",
            Layer::GlobalServices => "layer-2-global-services",
            Layer::GlobalInfra => "layer-3-global-infra",
        }
    }

    /// Short identifier used for vault directories and secret object names
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Layer::Applications => "layer0",
            Layer::TenantInfra => "layer1",
            Layer::GlobalServices => "layer2",
            Layer::GlobalInfra => "layer3",
        }
    }

    /// Human-readable display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Layer::Applications => "Layer 0: Applications",
            Layer::TenantInfra => "Layer 1: Tenant Infrastructure",
            Layer::GlobalServices => "Layer 2: Global Services",
            Layer::GlobalInfra => "Layer 3: Global Infrastructure",
        }
    }

    /// Layer from its number (0-3)
    pub fn from_number(number: u8) -> Result<Self> {
        match number {
            0 => Ok(Layer::Applications),
            1 => Ok(Layer::TenantInfra),
            2 => Ok(Layer::GlobalServices),
            3 => Ok(Layer::GlobalInfra),
            _ => Err(Error::configuration(format!(
                "invalid layer number: {number} (expected 0-3)"
            ))),
        }
    }

    /// Layer from its namespace name
    pub fn from_namespace(namespace: &str) -> Result<Self> {
        Layer::all()
            .into_iter()
            .find(|layer| layer.namespace() == namespace)
            .ok_or_else(|| Error::configuration(format!("unknown layer namespace: '{namespace}'")))
    }

    /// Layer from any accepted string form.
    ///
    /// Accepts short identifiers (`layer0`..`layer3`), bare digits (`0`..`3`),
    /// and full namespace names. Matching is case-insensitive.
    pub fn from_string(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase();

        if let Some(layer) = Layer::all()
            .into_iter()
            .find(|layer| layer.short_name() == normalized)
        {
            return Ok(layer);
        }

        if normalized.len() == 1 {
            if let Ok(number) = normalized.parse::<u8>() {
                return Layer::from_number(number);
            }
        }

        if let Ok(layer) = Layer::from_namespace(&normalized) {
            return Ok(layer);
        }

        Err(Error::configuration(format!(
            "invalid layer: '{value}' (use layer0-layer3, 0-3, or a layer namespace)"
        )))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl Serialize for Layer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_name())
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Layer::from_string(&value).map_err(serde::de::Error::custom)
    }
}
