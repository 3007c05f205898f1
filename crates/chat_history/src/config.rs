//! History store configuration.

use std::env;

use storage_backend::keys;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of retained records; oldest are dropped first.
    pub capacity: usize,
    /// Backend key the serialized array is stored under.
    pub key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            key: keys::HISTORY.to_string(),
        }
    }
}

impl HistoryConfig {
    /// Defaults with an optional `CHAT_HISTORY_CAPACITY` override.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(capacity) = env_usize_opt("CHAT_HISTORY_CAPACITY") {
            config.capacity = capacity;
        }
        config
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

fn env_usize_opt(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::{Mutex, OnceLock};

    use super::{HistoryConfig, DEFAULT_CAPACITY};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let _lock = env_lock();
        let _guard = set_env_guard("CHAT_HISTORY_CAPACITY", None);
        let config = HistoryConfig::from_env();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn env_override_applies() {
        let _lock = env_lock();
        let _guard = set_env_guard("CHAT_HISTORY_CAPACITY", Some("5"));
        let config = HistoryConfig::from_env();
        assert_eq!(config.capacity, 5);
    }

    #[test]
    fn zero_and_junk_overrides_are_ignored() {
        let _lock = env_lock();
        let _guard = set_env_guard("CHAT_HISTORY_CAPACITY", Some("0"));
        assert_eq!(HistoryConfig::from_env().capacity, DEFAULT_CAPACITY);
        let _guard = set_env_guard("CHAT_HISTORY_CAPACITY", Some("many"));
        assert_eq!(HistoryConfig::from_env().capacity, DEFAULT_CAPACITY);
    }
}
