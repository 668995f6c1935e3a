//! Vault encryption-status inspection (local-only)

use std::ffi::OsStr;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use stratum_context::{ensure_local, ContextProbe};
use stratum_core::constants::{AGE_HEADER, ENCRYPTED_FILE_PREFIX};
use stratum_core::{Environment, Error, Layer, Result};
use walkdir::WalkDir;

/// One environment's directory under the vault root.
///
/// The external secrets tool encrypts and decrypts all files of an
/// environment together; this type only reports the current form and lists
/// files, it never performs cryptography itself. Encrypted-at-rest files
/// carry a `secret.` name prefix; a vault is encrypted when any such file
/// lacks its decrypted counterpart.
#[derive(Debug)]
pub struct Vault {
    environment: Environment,
    path: PathBuf,
}

impl Vault {
    /// Open the directory for `environment` under the vault root.
    ///
    /// The root defaults to the discovered location (overrides, then a
    /// `vault/` directory near the working directory). The environment
    /// directory must exist; which environments have been materialized is
    /// exactly what callers use this type to find out.
    pub fn open(
        probe: &ContextProbe,
        environment: Environment,
        root: Option<PathBuf>,
    ) -> Result<Self> {
        ensure_local(probe)?;

        let root = root.or_else(crate::vault::discover_vault_root).ok_or_else(|| {
            Error::configuration(
                "vault root not found, looked for 'vault/' in the working directory and its parents",
            )
        })?;

        let path = root.join(environment.as_str());
        if !path.is_dir() {
            let available = available_environments(&root).join(", ");
            return Err(Error::configuration(format!(
                "vault directory not found: {} (available environments: {available})",
                path.display()
            )));
        }

        tracing::debug!(environment = %environment, path = %path.display(), "opened vault");
        Ok(Self { environment, path })
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn layer_path(&self, layer: Layer) -> PathBuf {
        self.path.join(layer.short_name())
    }

    /// Path to a vault file by its decrypted name
    #[must_use]
    pub fn file(&self, layer: Layer, filename: &str) -> PathBuf {
        self.path.join(layer.short_name()).join(filename)
    }

    /// Whether the vault is currently in encrypted form.
    ///
    /// True when any `secret.*` file lacks its decrypted counterpart. Tool
    /// configuration files (`secret.map.cfg` and friends) are not encrypted
    /// payloads and are skipped.
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        for entry in WalkDir::new(&self.path)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.starts_with(ENCRYPTED_FILE_PREFIX) {
                continue;
            }
            if matches!(
                entry.path().extension().and_then(OsStr::to_str),
                Some("cfg" | "conf" | "config")
            ) {
                continue;
            }

            let decrypted_name = name.replacen(ENCRYPTED_FILE_PREFIX, "", 1);
            let decrypted = entry.path().with_file_name(&decrypted_name);
            if !decrypted.exists() {
                tracing::debug!(file = %name, "vault is encrypted, no decrypted counterpart");
                return true;
            }
        }
        false
    }

    /// All decrypted YAML files, optionally restricted to one layer.
    ///
    /// Skips `secret.*` files and example/template files, sorted for
    /// deterministic iteration.
    #[must_use]
    pub fn decrypted_files(&self, layer: Option<Layer>) -> Vec<PathBuf> {
        let search_path = match layer {
            Some(layer) => self.layer_path(layer),
            None => self.path.clone(),
        };

        let mut files: Vec<PathBuf> = WalkDir::new(search_path)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                    return false;
                };
                if name.starts_with(ENCRYPTED_FILE_PREFIX) {
                    return false;
                }
                if name.ends_with(".example") || name.ends_with(".template") {
                    return false;
                }
                matches!(path.extension().and_then(OsStr::to_str), Some("yaml" | "yml"))
            })
            .collect();
        files.sort();
        files
    }
}

/// Whether a file is age-encrypted, decided by its header
#[must_use]
pub fn is_age_encrypted(path: &Path) -> bool {
    let Ok(mut file) = fs::File::open(path) else {
        return false;
    };
    let mut header = [0u8; 24];
    let Ok(read) = file.read(&mut header) else {
        return false;
    };
    header[..read].starts_with(AGE_HEADER)
}

fn available_environments(root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_probe() -> (tempfile::TempDir, ContextProbe) {
        let mount = tempfile::tempdir().unwrap();
        let probe = ContextProbe::with_mount_dir(mount.path());
        (mount, probe)
    }

    fn vault_with_layer(env: &str, layer: &str) -> (tempfile::TempDir, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(env).join(layer);
        fs::create_dir_all(&dir).unwrap();
        let path = root.path().to_path_buf();
        (root, path)
    }

    #[test]
    fn missing_environment_directory_is_an_error() {
        let (_mount, probe) = local_probe();
        let (_root_guard, root) = vault_with_layer("dev", "layer0");
        let error =
            Vault::open(&probe, Environment::new("staging"), Some(root)).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("staging"));
        assert!(message.contains("dev"));
    }

    #[test]
    fn decrypted_counterparts_mean_decrypted() {
        let (_mount, probe) = local_probe();
        let (_root_guard, root) = vault_with_layer("dev", "layer3");
        let layer_dir = root.join("dev").join("layer3");
        fs::write(layer_dir.join("secret.creds.yaml"), "ciphertext").unwrap();
        fs::write(layer_dir.join("creds.yaml"), "api-key: y\n").unwrap();

        let vault = Vault::open(&probe, Environment::new("dev"), Some(root)).unwrap();
        assert!(!vault.is_encrypted());
    }

    #[test]
    fn missing_counterpart_means_encrypted() {
        let (_mount, probe) = local_probe();
        let (_root_guard, root) = vault_with_layer("dev", "layer3");
        fs::write(
            root.join("dev").join("layer3").join("secret.creds.yaml"),
            "ciphertext",
        )
        .unwrap();

        let vault = Vault::open(&probe, Environment::new("dev"), Some(root)).unwrap();
        assert!(vault.is_encrypted());
    }

    #[test]
    fn tool_metadata_files_are_ignored() {
        let (_mount, probe) = local_probe();
        let (_root_guard, root) = vault_with_layer("dev", "layer3");
        fs::write(
            root.join("dev").join("layer3").join("secret.map.cfg"),
            "file list",
        )
        .unwrap();

        let vault = Vault::open(&probe, Environment::new("dev"), Some(root)).unwrap();
        assert!(!vault.is_encrypted());
    }

    #[test]
    fn decrypted_files_lists_only_payload_yaml() {
        let (_mount, probe) = local_probe();
        let (_root_guard, root) = vault_with_layer("dev", "layer3");
        let layer_dir = root.join("dev").join("layer3");
        fs::write(layer_dir.join("creds.yaml"), "api-key: y\n").unwrap();
        fs::write(layer_dir.join("secret.creds.yaml"), "ciphertext").unwrap();
        fs::write(layer_dir.join("creds.yaml.example"), "api-key: fill\n").unwrap();
        fs::write(layer_dir.join("notes.txt"), "not yaml").unwrap();

        let vault = Vault::open(&probe, Environment::new("dev"), Some(root)).unwrap();
        let files = vault.decrypted_files(Some(Layer::GlobalInfra));
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("creds.yaml"));
    }

    #[test]
    fn age_header_detection() {
        let dir = tempfile::tempdir().unwrap();
        let encrypted = dir.path().join("enc");
        fs::write(&encrypted, b"age-encryption.org/v1\n-> X25519").unwrap();
        let plain = dir.path().join("plain");
        fs::write(&plain, "api-key: y\n").unwrap();

        assert!(is_age_encrypted(&encrypted));
        assert!(!is_age_encrypted(&plain));
        assert!(!is_age_encrypted(&dir.path().join("missing")));
    }

    #[test]
    fn construction_in_cluster_is_wrong_context() {
        let mount = tempfile::tempdir().unwrap();
        fs::write(mount.path().join("token"), "jwt").unwrap();
        let probe = ContextProbe::with_mount_dir(mount.path());
        let (_root_guard, root) = vault_with_layer("dev", "layer0");

        assert!(matches!(
            Vault::open(&probe, Environment::new("dev"), Some(root)),
            Err(Error::WrongContext { .. })
        ));
    }
}
