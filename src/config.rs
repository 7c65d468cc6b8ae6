use std::env;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/school.db";

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub seed_default_activities: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_millis(5000),
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_default_activities: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: non_empty("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(defaults.max_connections),
            busy_timeout: non_empty("DATABASE_BUSY_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.busy_timeout),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            seed_default_activities: non_empty("SEED_DEFAULT_ACTIVITIES")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.seed_default_activities),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address tried when the configured port is already taken.
    pub fn fallback_bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port.saturating_add(1))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.seed_default_activities);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("DATABASE_BUSY_TIMEOUT_MS", "250"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("SEED_DEFAULT_ACTIVITIES", "off"),
        ]);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.fallback_bind_addr(), "0.0.0.0:8081");
        assert!(!config.seed_default_activities);
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = config_from(&[
            ("DATABASE_URL", "   "),
            ("DATABASE_MAX_CONNECTIONS", "0"),
            ("PORT", "not-a-port"),
            ("SEED_DEFAULT_ACTIVITIES", "maybe"),
        ]);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.port, 3000);
        assert!(config.seed_default_activities);
    }
}
