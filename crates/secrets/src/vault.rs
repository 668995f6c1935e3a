//! Vault directory secret origin (local-only)

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use stratum_context::{ensure_local, ContextProbe};
use stratum_core::constants::{
    ANCESTOR_SEARCH_DEPTH, ENCRYPTED_FILE_PREFIX, METADATA_KEYS, SHARED_WITH_KEY,
    STRATUM_ROOT_VAR, STRATUM_VAULT_DIR_VAR, VAULT_DIR_NAME,
};
use stratum_core::{Environment, Error, Layer, Result, SecretBundle, SecretOrigin};
use stratum_utils::{find_in_ancestors, SyncEnv};

/// Reads secret bundles from decrypted vault files on a workstation.
///
/// Bundles live at `<root>/<environment>/<layerN>/*.yaml`, one flat mapping
/// per file; every file in a layer directory merges into that layer's
/// bundle. Encrypted-at-rest files (`secret.*`) and example/template files
/// are never read. A missing root, environment, or layer directory resolves
/// to an empty bundle since vaults grow incrementally.
pub struct VaultOrigin {
    root: Option<PathBuf>,
}

impl VaultOrigin {
    /// Origin with the vault root discovered from overrides or convention
    pub fn new(probe: &ContextProbe) -> Result<Self> {
        Self::with_root(probe, None)
    }

    /// Origin with an explicit vault root, bypassing discovery
    pub fn with_root(probe: &ContextProbe, root: Option<PathBuf>) -> Result<Self> {
        ensure_local(probe)?;
        let root = root.or_else(discover_vault_root);
        match &root {
            Some(root) => tracing::debug!(root = %root.display(), "initialized vault origin"),
            None => tracing::debug!("no vault root discovered, reads resolve to empty bundles"),
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl SecretOrigin for VaultOrigin {
    fn read(&self, environment: &Environment, layer: Layer) -> Result<SecretBundle> {
        let Some(root) = &self.root else {
            return Ok(SecretBundle::new());
        };

        let dir = root.join(environment.as_str()).join(layer.short_name());
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "no vault directory for layer");
            return Ok(SecretBundle::new());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|e| Error::file_system(&dir, "read vault directory", e))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_bundle_file(path))
            .collect();
        files.sort();

        let mut bundle = SecretBundle::new();
        for file in &files {
            bundle.absorb(parse_bundle_file(file)?);
        }
        tracing::debug!(
            environment = %environment,
            layer = %layer,
            files = files.len(),
            keys = bundle.len(),
            "read vault bundle"
        );
        Ok(bundle)
    }
}

/// Resolve the vault root: explicit directory override, then a root
/// directory override, then a `vault/` directory near the working directory.
pub(crate) fn discover_vault_root() -> Option<PathBuf> {
    if let Some(dir) = SyncEnv::var(STRATUM_VAULT_DIR_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(root) = SyncEnv::var(STRATUM_ROOT_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(root).join(VAULT_DIR_NAME));
    }
    let cwd = std::env::current_dir().ok()?;
    find_in_ancestors(&cwd, VAULT_DIR_NAME, ANCESTOR_SEARCH_DEPTH)
}

fn is_bundle_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return false;
    };
    if name.starts_with(ENCRYPTED_FILE_PREFIX) {
        return false;
    }
    if name.ends_with(".example") || name.ends_with(".template") {
        return false;
    }
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("yaml" | "yml")
    )
}

fn parse_bundle_file(path: &Path) -> Result<SecretBundle> {
    let text =
        fs::read_to_string(path).map_err(|e| Error::file_system(path, "read vault file", e))?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|e| Error::yaml(path, e.to_string()))?;

    // Empty files parse as null and contribute nothing
    if doc.is_null() {
        return Ok(SecretBundle::new());
    }
    let mapping = doc.as_mapping().ok_or_else(|| {
        Error::yaml(path, "vault file must be a mapping of secret keys to values")
    })?;

    let mut bundle = SecretBundle::new();
    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| Error::yaml(path, "secret keys must be strings"))?;

        if key == SHARED_WITH_KEY {
            for layer in parse_shared_with(path, value)? {
                bundle.share_with(layer);
            }
        } else if METADATA_KEYS.contains(&key) {
            bundle.insert_metadata(key, scalar_to_string(path, key, value)?);
        } else {
            bundle.insert(key, scalar_to_string(path, key, value)?);
        }
    }
    Ok(bundle)
}

fn parse_shared_with(path: &Path, value: &serde_yaml::Value) -> Result<Vec<Layer>> {
    let list = value.as_sequence().ok_or_else(|| {
        Error::yaml(path, format!("'{SHARED_WITH_KEY}' must be a list of layer names"))
    })?;
    list.iter()
        .map(|item| {
            let name = item.as_str().ok_or_else(|| {
                Error::yaml(path, format!("'{SHARED_WITH_KEY}' entries must be strings"))
            })?;
            Layer::from_string(name)
                .map_err(|e| Error::yaml(path, format!("invalid layer in '{SHARED_WITH_KEY}': {e}")))
        })
        .collect()
}

fn scalar_to_string(path: &Path, key: &str, value: &serde_yaml::Value) -> Result<String> {
    match value {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(Error::yaml(
            path,
            format!("value for '{key}' must be a scalar"),
        )),
    }
}
