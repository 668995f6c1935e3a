use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::env;

/// Global lock for process environment access.
/// Reads are far more common than writes, hence an RwLock.
static ENV_LOCK: Lazy<RwLock<()>> = Lazy::new(|| RwLock::new(()));

/// Thread-safe process environment operations.
///
/// The exporter mutates process-wide environment state; routing every access
/// through one lock keeps concurrent readers from observing a half-applied
/// export.
pub struct SyncEnv;

impl SyncEnv {
    /// Set an environment variable
    pub fn set_var<K: AsRef<str>, V: AsRef<str>>(key: K, value: V) {
        let _guard = ENV_LOCK.write();
        env::set_var(key.as_ref(), value.as_ref());
    }

    /// Get an environment variable, `None` when unset or not unicode
    #[must_use]
    pub fn var<K: AsRef<str>>(key: K) -> Option<String> {
        let _guard = ENV_LOCK.read();
        env::var(key.as_ref()).ok()
    }

    /// Remove an environment variable
    pub fn remove_var<K: AsRef<str>>(key: K) {
        let _guard = ENV_LOCK.write();
        env::remove_var(key.as_ref());
    }

    /// Snapshot of all environment variables
    #[must_use]
    pub fn vars() -> Vec<(String, String)> {
        let _guard = ENV_LOCK.read();
        env::vars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn set_get_remove_round_trip() {
        let key = format!("STRATUM_TEST_SYNC_ENV_{}", uuid::Uuid::new_v4().simple());

        SyncEnv::set_var(&key, "value1");
        assert_eq!(SyncEnv::var(&key), Some("value1".to_string()));

        SyncEnv::remove_var(&key);
        assert_eq!(SyncEnv::var(&key), None);
    }

    #[test]
    fn concurrent_writers_do_not_corrupt() {
        let key = format!("STRATUM_TEST_CONCURRENT_{}", uuid::Uuid::new_v4().simple());

        let key_clone = key.clone();
        let handle = thread::spawn(move || {
            SyncEnv::set_var(&key_clone, "from-thread");
        });
        handle.join().expect("thread panicked");

        assert_eq!(SyncEnv::var(&key), Some("from-thread".to_string()));
        SyncEnv::remove_var(&key);
    }

    #[test]
    fn vars_contains_set_variable() {
        let key = format!("STRATUM_TEST_VARS_{}", uuid::Uuid::new_v4().simple());
        SyncEnv::set_var(&key, "present");

        let all = SyncEnv::vars();
        assert!(all.iter().any(|(k, v)| k == &key && v == "present"));
        SyncEnv::remove_var(&key);
    }
}
