/// Constants used throughout the stratum codebase
// Cluster credential mount (present in every pod, absent on workstations)
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";
pub const SERVICE_ACCOUNT_TOKEN_FILE: &str = "token";
pub const SERVICE_ACCOUNT_NAMESPACE_FILE: &str = "namespace";

// Environment variable names
pub const STRATUM_ENV_VAR: &str = "STRATUM_ENV";
pub const STRATUM_VAULT_DIR_VAR: &str = "STRATUM_VAULT_DIR";
pub const STRATUM_ROOT_VAR: &str = "STRATUM_ROOT";

// Local project file declaring the active environment
pub const STRATUM_CONFIG_FILENAME: &str = ".stratum.yaml";
pub const ENVIRONMENT_KEY: &str = "environment";

// Default deployment track when no source declares one
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// Conventional cluster objects, scoped to each layer's namespace
pub const CLUSTER_CONFIGMAP_NAME: &str = "stratum-config";
pub const CLUSTER_CONFIGMAP_KEY: &str = "environment";
pub const CLUSTER_SECRET_SUFFIX: &str = "-secrets";
pub const CLUSTER_REQUEST_TIMEOUT: &str = "5s";

// Vault layout
pub const VAULT_DIR_NAME: &str = "vault";
pub const ENCRYPTED_FILE_PREFIX: &str = "secret.";
pub const AGE_HEADER: &[u8] = b"age-encryption.org/v1";

// Bundle keys that carry annotations rather than secret material
pub const SHARED_WITH_KEY: &str = "shared_with";
pub const METADATA_KEYS: &[&str] = &["shared_with", "description", "created", "status", "migration"];

// How many parent directories to search for project-level files
pub const ANCESTOR_SEARCH_DEPTH: usize = 3;
