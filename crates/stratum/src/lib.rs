//! Configuration, secrets, and service endpoint resolution for layered
//! deployments.
//!
//! Stratum resolves secrets for a four-layer deployment topology,
//! transparently adapting to whether the process runs on a developer
//! workstation or inside a cluster pod. The [`ProviderRegistry`] wires the
//! context-appropriate environment detector and secrets provider; the
//! resolver merges each layer's own bundle with bundles explicitly shared
//! into it; the exporter publishes the result as process environment
//! variables.
//!
//! ## Loading secrets at startup
//!
//! ```no_run
//! use stratum::{load_secrets_for_layer, Layer};
//!
//! let secrets = load_secrets_for_layer(Layer::Applications, true)?;
//! // REDIS_CLIENT_HOST, API_KEY, ... are now set in the process environment
//! # Ok::<(), stratum::Error>(())
//! ```

mod registry;

pub use registry::{registry, ProviderRegistry};
pub use stratum_context::{is_in_cluster, ContextProbe};
pub use stratum_core::{
    CredentialSource, Environment, EnvironmentDetector, Error, ExecutionContext, Layer,
    ResolvedSecrets, Result, SecretBundle, SecretOrigin, ServiceCredentials,
};
pub use stratum_secrets::{
    env_var_name, export, ClusterSecretOrigin, CredentialSessionFactory, SecretsResolver, Vault,
    VaultOrigin,
};

use std::sync::Arc;

/// Load every secret a layer may read and optionally export the result.
///
/// This is the main entry point for applications: called once at startup,
/// after which configuration libraries find their variables in the process
/// environment. Export never overrides variables already present, so
/// explicitly exported values in the developer's shell keep priority.
pub fn load_secrets_for_layer(layer: Layer, auto_export: bool) -> Result<ResolvedSecrets> {
    let secrets = registry().resolver()?.resolve(layer)?;
    if auto_export {
        export(&secrets, false);
    }
    Ok(secrets)
}

/// Environment detector from the process-wide registry (singleton)
pub fn environment_detector() -> Result<Arc<dyn EnvironmentDetector>> {
    registry().environment_detector()
}

/// Secrets provider from the process-wide registry (singleton)
pub fn secret_origin() -> Result<Arc<dyn SecretOrigin>> {
    registry().secret_origin()
}

/// Credential source from the process-wide registry (singleton)
pub fn credential_source() -> Result<Arc<dyn CredentialSource>> {
    registry().credential_source()
}

/// Vault status manager from the process-wide registry (singleton, local-only)
pub fn vault() -> Result<Arc<Vault>> {
    registry().vault()
}
