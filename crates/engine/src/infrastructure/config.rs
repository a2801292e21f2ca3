//! Environment-driven server configuration.

use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// SQLite file for the creature store; `None` selects the in-memory store.
    pub creature_db: Option<String>,
    /// Deadline for every store call.
    pub store_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.into(),
            server_port: DEFAULT_PORT,
            creature_db: None,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.server_port);
        let creature_db = lookup("CREATURE_DB")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let store_timeout = lookup("STORE_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.store_timeout);

        Self {
            server_host,
            server_port,
            creature_db,
            store_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = EngineConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert!(config.creature_db.is_none());
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = EngineConfig::from_lookup(lookup_from(&[("PORT", "9000")]));
        assert_eq!(config.server_port, 9000);

        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "7000"),
            ("PORT", "9000"),
        ]));
        assert_eq!(config.server_port, 7000);
    }

    #[test]
    fn invalid_values_use_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("STORE_TIMEOUT_MS", "0"),
            ("CREATURE_DB", "  "),
        ]));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert!(config.creature_db.is_none());
    }

    #[test]
    fn reads_store_settings() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("CREATURE_DB", "creatures.db"),
            ("STORE_TIMEOUT_MS", "250"),
        ]));
        assert_eq!(config.creature_db.as_deref(), Some("creatures.db"));
        assert_eq!(config.store_timeout, Duration::from_millis(250));
    }
}
