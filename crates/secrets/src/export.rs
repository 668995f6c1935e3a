//! Export of resolved secrets into process environment variables

use stratum_core::ResolvedSecrets;
use stratum_utils::SyncEnv;

/// Convert a bundle key to its exported variable name.
///
/// `redis-client-host` becomes `REDIS_CLIENT_HOST`.
#[must_use]
pub fn env_var_name(key: &str) -> String {
    key.replace('-', "_").to_uppercase()
}

/// Write resolved secrets into the process environment.
///
/// A pre-existing variable wins unless `override_existing` is set; an
/// explicitly exported value in the developer's shell beats a discovered
/// secret, which keeps local debugging overrides safe. Exporting the same
/// mapping twice with the same flag produces the same end state.
pub fn export(secrets: &ResolvedSecrets, override_existing: bool) {
    for (key, value) in secrets.iter() {
        let name = env_var_name(key);

        if !override_existing && SyncEnv::var(&name).is_some() {
            tracing::debug!(variable = %name, "existing value kept");
            continue;
        }
        SyncEnv::set_var(&name, value);
    }
    tracing::debug!(count = secrets.len(), "exported secrets to environment");
}
