//! Capability contracts implemented once per execution context.
//!
//! One trait per capability, one concrete implementation per context; the
//! registry in the `stratum` crate selects the arm and caches the result.
//! Downstream collaborators consume resolved secrets or exported variables
//! only and never talk to a `SecretOrigin` directly.

use crate::errors::Result;
use crate::types::{Environment, Layer, SecretBundle, ServiceCredentials};

/// Detects the active deployment environment.
///
/// Implementations: cluster (config object in the layer's namespace) and
/// local (`.stratum.yaml` project file). Both honor the `STRATUM_ENV`
/// process override and fall back to the default track when no source
/// declares one.
pub trait EnvironmentDetector: Send + Sync {
    /// Active environment for a layer
    fn get_environment(&self, layer: Layer) -> Result<Environment>;
}

/// Reads raw secret bundles for an (environment, layer) pair.
///
/// Implementations: vault directory reader (local) and cluster secret store
/// reader. Absence of a bundle is a normal operating state and yields an
/// empty bundle, not an error.
pub trait SecretOrigin: Send + Sync {
    fn read(&self, environment: &Environment, layer: Layer) -> Result<SecretBundle>;
}

/// Issues credential fields for one service.
///
/// Unlike bundle reads, a missing credential set is an error here: callers
/// ask for a service's credentials only when their next step requires them.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self, service: &str, layer: Layer) -> Result<ServiceCredentials>;
}
