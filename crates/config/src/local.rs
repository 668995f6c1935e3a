//! Local environment detection from `.stratum.yaml` (local-only)

use std::fs;
use std::path::{Path, PathBuf};
use stratum_context::{ensure_local, ContextProbe};
use stratum_core::constants::{
    ANCESTOR_SEARCH_DEPTH, ENVIRONMENT_KEY, STRATUM_CONFIG_FILENAME, STRATUM_ENV_VAR,
};
use stratum_core::{Environment, EnvironmentDetector, Error, Layer, Result};
use stratum_utils::{find_in_ancestors, SyncEnv};

/// Detects the active environment from a `.stratum.yaml` project file.
///
/// The file is searched for in the project root (the working directory by
/// default) and up to three parent directories, so nested crate and package
/// directories inherit their repository's declaration. A missing file is
/// normal during early setup and resolves to the default track; a file that
/// exists but cannot be parsed is a configuration error.
#[derive(Debug)]
pub struct LocalEnvironmentDetector {
    project_root: PathBuf,
}

impl LocalEnvironmentDetector {
    /// Detector rooted at the current working directory
    pub fn new(probe: &ContextProbe) -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::configuration(format!("cannot determine working directory: {e}")))?;
        Self::with_root(probe, cwd)
    }

    /// Detector rooted at an explicit project directory
    pub fn with_root(probe: &ContextProbe, project_root: impl Into<PathBuf>) -> Result<Self> {
        ensure_local(probe)?;
        let project_root = project_root.into();
        tracing::debug!(root = %project_root.display(), "initialized local environment detector");
        Ok(Self { project_root })
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        find_in_ancestors(
            &self.project_root,
            STRATUM_CONFIG_FILENAME,
            ANCESTOR_SEARCH_DEPTH,
        )
    }

    fn read_config_file(path: &Path) -> Result<Environment> {
        let text =
            fs::read_to_string(path).map_err(|e| Error::file_system(path, "read config", e))?;
        let doc: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|e| Error::yaml(path, e.to_string()))?;

        if !doc.is_mapping() {
            return Err(Error::yaml(path, "expected a YAML mapping"));
        }
        let name = doc
            .get(ENVIRONMENT_KEY)
            .and_then(serde_yaml::Value::as_str)
            .ok_or_else(|| {
                Error::yaml(
                    path,
                    format!("missing '{ENVIRONMENT_KEY}' key (expected format: environment: dev)"),
                )
            })?;

        tracing::debug!(environment = %name, file = %path.display(), "detected environment");
        Ok(Environment::new(name))
    }
}

impl EnvironmentDetector for LocalEnvironmentDetector {
    fn get_environment(&self, _layer: Layer) -> Result<Environment> {
        // Explicit process override beats any discovered source
        if let Some(name) = SyncEnv::var(STRATUM_ENV_VAR).filter(|v| !v.is_empty()) {
            tracing::debug!(environment = %name, "environment taken from {STRATUM_ENV_VAR}");
            return Ok(Environment::new(name));
        }

        match self.find_config_file() {
            Some(path) => Self::read_config_file(&path),
            None => {
                tracing::debug!(
                    "no {STRATUM_CONFIG_FILENAME} found, falling back to default environment"
                );
                Ok(Environment::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    fn local_probe() -> (tempfile::TempDir, ContextProbe) {
        let mount = tempfile::tempdir().unwrap();
        let probe = ContextProbe::with_mount_dir(mount.path());
        (mount, probe)
    }

    #[test]
    #[serial]
    fn reads_environment_from_project_file() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(".stratum.yaml"), "environment: staging\n").unwrap();

        let detector = LocalEnvironmentDetector::with_root(&probe, project.path()).unwrap();
        let env = detector.get_environment(Layer::Applications).unwrap();
        assert_eq!(env, "staging");
    }

    #[test]
    #[serial]
    fn missing_file_falls_back_to_default() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();

        let detector = LocalEnvironmentDetector::with_root(&probe, project.path()).unwrap();
        let env = detector.get_environment(Layer::GlobalInfra).unwrap();
        assert_eq!(env, "dev");
    }

    #[test]
    #[serial]
    fn file_in_parent_directory_is_found() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(".stratum.yaml"), "environment: test\n").unwrap();
        let nested = project.path().join("services/api");
        fs::create_dir_all(&nested).unwrap();

        let detector = LocalEnvironmentDetector::with_root(&probe, &nested).unwrap();
        assert_eq!(detector.get_environment(Layer::Applications).unwrap(), "test");
    }

    #[test]
    #[serial]
    fn env_var_override_wins_over_file() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(".stratum.yaml"), "environment: staging\n").unwrap();

        SyncEnv::set_var(STRATUM_ENV_VAR, "prod");
        let detector = LocalEnvironmentDetector::with_root(&probe, project.path()).unwrap();
        let env = detector.get_environment(Layer::Applications);
        SyncEnv::remove_var(STRATUM_ENV_VAR);

        assert_eq!(env.unwrap(), "prod");
    }

    #[test]
    #[serial]
    fn malformed_yaml_is_an_error() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(".stratum.yaml"), "environment: [unclosed\n").unwrap();

        let detector = LocalEnvironmentDetector::with_root(&probe, project.path()).unwrap();
        assert!(matches!(
            detector.get_environment(Layer::Applications),
            Err(Error::Yaml { .. })
        ));
    }

    #[test]
    #[serial]
    fn missing_environment_key_is_an_error() {
        let (_mount, probe) = local_probe();
        let project = tempfile::tempdir().unwrap();
        fs::write(project.path().join(".stratum.yaml"), "name: something\n").unwrap();

        let detector = LocalEnvironmentDetector::with_root(&probe, project.path()).unwrap();
        assert!(matches!(
            detector.get_environment(Layer::Applications),
            Err(Error::Yaml { .. })
        ));
    }

    #[test]
    fn construction_in_cluster_is_wrong_context() {
        let mount = tempfile::tempdir().unwrap();
        fs::write(mount.path().join("token"), "jwt").unwrap();
        let probe = ContextProbe::with_mount_dir(mount.path());

        let error = LocalEnvironmentDetector::with_root(&probe, "/tmp").unwrap_err();
        assert!(matches!(error, Error::WrongContext { .. }));
    }
}
