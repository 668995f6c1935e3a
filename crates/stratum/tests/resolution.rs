//! End-to-end resolution scenarios over a vault directory tree

use std::fs;
use std::path::Path;
use std::sync::Arc;
use stratum::{
    env_var_name, export, ContextProbe, Environment, EnvironmentDetector, Layer,
    ProviderRegistry, Result, VaultOrigin,
};
use stratum_utils::SyncEnv;

struct FixedEnvironment(&'static str);

impl EnvironmentDetector for FixedEnvironment {
    fn get_environment(&self, _layer: Layer) -> Result<Environment> {
        Ok(Environment::new(self.0))
    }
}

fn write_vault_file(root: &Path, env: &str, layer: &str, name: &str, content: &str) {
    let dir = root.join(env).join(layer);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// Fresh registry on a local probe, wired to a vault at `root`
fn registry_over_vault(root: &Path) -> (tempfile::TempDir, ProviderRegistry) {
    let mount = tempfile::tempdir().unwrap();
    let probe = ContextProbe::with_mount_dir(mount.path());
    let registry = ProviderRegistry::with_probe(probe.clone());
    registry.set_environment_detector(Arc::new(FixedEnvironment("dev")));
    registry.set_secret_origin(Arc::new(
        VaultOrigin::with_root(&probe, Some(root.to_path_buf())).unwrap(),
    ));
    (mount, registry)
}

#[test]
fn shared_bundle_reaches_requesting_layer() {
    let vault = tempfile::tempdir().unwrap();
    write_vault_file(
        vault.path(),
        "dev",
        "layer1",
        "redis.yaml",
        "redis-password: \"x\"\nshared_with: [layer0]\n",
    );
    write_vault_file(vault.path(), "dev", "layer0", "app.yaml", "api-key: \"y\"\n");

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::Applications)
        .unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.get("api-key"), Some("y"));
    assert_eq!(resolved.get("redis-password"), Some("x"));
}

#[test]
fn unshared_bundle_stays_isolated() {
    let vault = tempfile::tempdir().unwrap();
    write_vault_file(
        vault.path(),
        "dev",
        "layer1",
        "redis.yaml",
        "redis-password: \"x\"\n",
    );
    write_vault_file(vault.path(), "dev", "layer0", "app.yaml", "api-key: \"y\"\n");

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::Applications)
        .unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("api-key"), Some("y"));
    assert!(!resolved.contains_key("redis-password"));
}

#[test]
fn empty_vault_resolves_to_empty_mapping() {
    let vault = tempfile::tempdir().unwrap();

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::GlobalServices)
        .unwrap();

    assert!(resolved.is_empty());
}

#[test]
fn resolved_keys_export_under_transformed_names() {
    let vault = tempfile::tempdir().unwrap();
    write_vault_file(
        vault.path(),
        "dev",
        "layer3",
        "redis.yaml",
        "redis-client-host: redis.internal\n",
    );

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::GlobalInfra)
        .unwrap();

    assert_eq!(env_var_name("redis-client-host"), "REDIS_CLIENT_HOST");

    // The test environment may carry this name from an earlier run
    SyncEnv::remove_var("REDIS_CLIENT_HOST");
    export(&resolved, false);
    assert_eq!(
        SyncEnv::var("REDIS_CLIENT_HOST"),
        Some("redis.internal".to_string())
    );
    SyncEnv::remove_var("REDIS_CLIENT_HOST");
}

#[test]
fn metadata_keys_never_surface() {
    let vault = tempfile::tempdir().unwrap();
    write_vault_file(
        vault.path(),
        "dev",
        "layer0",
        "app.yaml",
        "api-key: \"y\"\ndescription: app credentials\ncreated: 2024-01-05\nstatus: active\n",
    );

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::Applications)
        .unwrap();

    assert_eq!(resolved.len(), 1);
    for key in ["shared_with", "description", "created", "status"] {
        assert!(!resolved.contains_key(key), "metadata key '{key}' leaked");
    }
}

#[test]
fn own_values_shadow_shared_values_end_to_end() {
    let vault = tempfile::tempdir().unwrap();
    write_vault_file(
        vault.path(),
        "dev",
        "layer3",
        "endpoints.yaml",
        "queue-endpoint: global\nshared_with: [layer0]\n",
    );
    write_vault_file(
        vault.path(),
        "dev",
        "layer0",
        "endpoints.yaml",
        "queue-endpoint: pinned\n",
    );

    let (_mount, registry) = registry_over_vault(vault.path());
    let resolved = registry
        .resolver()
        .unwrap()
        .resolve(Layer::Applications)
        .unwrap();

    assert_eq!(resolved.get("queue-endpoint"), Some("pinned"));
}
