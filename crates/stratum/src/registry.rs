//! Provider registry: context-appropriate wiring with singleton caching

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use stratum_config::{ClusterEnvironmentDetector, LocalEnvironmentDetector};
use stratum_context::ContextProbe;
use stratum_core::{CredentialSource, EnvironmentDetector, Layer, Result, SecretOrigin};
use stratum_secrets::{ClusterSecretOrigin, CredentialSessionFactory, SecretsResolver, Vault, VaultOrigin};

/// Maps each abstract capability to the concrete implementation that is
/// legal in the active execution context.
///
/// Every binding is a two-armed selector: the registry consults its probe
/// exactly once per capability resolution to pick the cluster or local arm,
/// constructs the implementation, and caches it for the life of the
/// registry. The cached instance freezes the choice; context is never
/// re-evaluated for that capability. Concrete constructors independently
/// re-check context and refuse to proceed when mismatched, and the registry
/// propagates that error unchanged.
///
/// The process-wide instance is reached through [`registry()`]; tests
/// construct fresh registries and install doubles through the `set_*`
/// methods without touching process-wide state.
pub struct ProviderRegistry {
    probe: ContextProbe,
    environment_detector: RwLock<Option<Arc<dyn EnvironmentDetector>>>,
    secret_origin: RwLock<Option<Arc<dyn SecretOrigin>>>,
    vault: RwLock<Option<Arc<Vault>>>,
    credential_source: RwLock<Option<Arc<dyn CredentialSource>>>,
}

/// Process-wide registry instance
static REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::new);

/// The process-wide registry
#[must_use]
pub fn registry() -> &'static ProviderRegistry {
    &REGISTRY
}

impl ProviderRegistry {
    /// Registry probing the well-known credential mount
    #[must_use]
    pub fn new() -> Self {
        Self::with_probe(ContextProbe::new())
    }

    /// Registry with an explicit probe (test isolation)
    #[must_use]
    pub fn with_probe(probe: ContextProbe) -> Self {
        Self {
            probe,
            environment_detector: RwLock::new(None),
            secret_origin: RwLock::new(None),
            vault: RwLock::new(None),
            credential_source: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn probe(&self) -> &ContextProbe {
        &self.probe
    }

    /// Environment detector for the active context (singleton)
    pub fn environment_detector(&self) -> Result<Arc<dyn EnvironmentDetector>> {
        if let Some(cached) = self.environment_detector.read().clone() {
            return Ok(cached);
        }

        let constructed: Arc<dyn EnvironmentDetector> = if self.probe.is_in_cluster() {
            tracing::debug!("wiring cluster environment detector");
            Arc::new(ClusterEnvironmentDetector::new(&self.probe)?)
        } else {
            tracing::debug!("wiring local environment detector");
            Arc::new(LocalEnvironmentDetector::new(&self.probe)?)
        };
        Ok(store(&self.environment_detector, constructed))
    }

    /// Secrets provider for the active context (singleton)
    pub fn secret_origin(&self) -> Result<Arc<dyn SecretOrigin>> {
        if let Some(cached) = self.secret_origin.read().clone() {
            return Ok(cached);
        }

        let constructed: Arc<dyn SecretOrigin> = if self.probe.is_in_cluster() {
            tracing::debug!("wiring cluster secret origin");
            Arc::new(ClusterSecretOrigin::new(&self.probe)?)
        } else {
            tracing::debug!("wiring vault secret origin");
            Arc::new(VaultOrigin::new(&self.probe)?)
        };
        Ok(store(&self.secret_origin, constructed))
    }

    /// Vault status manager (singleton, local-only; errors in-cluster).
    ///
    /// Depends on the environment detector binding. Environments are shared
    /// across layers in practice, so the vault is opened for the environment
    /// reported to layer 0.
    pub fn vault(&self) -> Result<Arc<Vault>> {
        if let Some(cached) = self.vault.read().clone() {
            return Ok(cached);
        }

        let detector = self.environment_detector()?;
        let environment = detector.get_environment(Layer::Applications)?;
        let constructed = Arc::new(Vault::open(&self.probe, environment, None)?);
        Ok(store(&self.vault, constructed))
    }

    /// Credential source for cloud sessions (singleton).
    ///
    /// Depends on the environment detector and secrets provider bindings by
    /// reference, so their lazy construction happens on demand first.
    pub fn credential_source(&self) -> Result<Arc<dyn CredentialSource>> {
        if let Some(cached) = self.credential_source.read().clone() {
            return Ok(cached);
        }

        let detector = self.environment_detector()?;
        let origin = self.secret_origin()?;
        let constructed: Arc<dyn CredentialSource> =
            Arc::new(CredentialSessionFactory::new(detector, origin));
        Ok(store(&self.credential_source, constructed))
    }

    /// Resolver wired from the registry's detector and origin bindings
    pub fn resolver(&self) -> Result<SecretsResolver> {
        Ok(SecretsResolver::new(
            self.environment_detector()?,
            self.secret_origin()?,
        ))
    }

    /// Replace the environment detector binding with a test double
    pub fn set_environment_detector(&self, detector: Arc<dyn EnvironmentDetector>) {
        *self.environment_detector.write() = Some(detector);
    }

    /// Replace the secrets provider binding with a test double
    pub fn set_secret_origin(&self, origin: Arc<dyn SecretOrigin>) {
        *self.secret_origin.write() = Some(origin);
    }

    /// Replace the credential source binding with a test double
    pub fn set_credential_source(&self, source: Arc<dyn CredentialSource>) {
        *self.credential_source.write() = Some(source);
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check-then-set singleton population. Parallel first constructions race
/// harmlessly to the same deterministic result; the first write wins and
/// later racers adopt it.
fn store<T: ?Sized>(slot: &RwLock<Option<Arc<T>>>, constructed: Arc<T>) -> Arc<T> {
    let mut slot = slot.write();
    if let Some(existing) = slot.clone() {
        return existing;
    }
    *slot = Some(constructed.clone());
    constructed
}
