use models::interval::MAX_RESERVATION_MINUTES;
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Connection-pool and workflow settings for a [`Store`](crate::db::Store)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    /// Pool ceiling: steady connections plus overflow
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Idle connections are recycled after this long
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    /// How long a caller waits for a pooled connection before failing
    pub acquire_timeout: Duration,
    pub connect_retries: u32,
    pub retry_backoff: Duration,
    /// Default deadline of one store operation
    pub operation_timeout: Duration,
    /// Length of a reservation slot when the booking does not name one
    pub reservation_minutes: i64,
    pub sql_logging: bool,
}

impl StoreConfig {
    /// 5 steady + 10 overflow connections
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 5;
    pub const DEFAULT_RECYCLE: Duration = Duration::from_secs(1800);
    pub const DEFAULT_RESERVATION_MINUTES: i64 = 60;

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_connections: Self::DEFAULT_MIN_CONNECTIONS,
            idle_timeout: Some(Self::DEFAULT_RECYCLE),
            max_lifetime: Some(Self::DEFAULT_RECYCLE),
            acquire_timeout: Duration::from_secs(5),
            connect_retries: 5,
            retry_backoff: Duration::from_millis(200),
            operation_timeout: Duration::from_secs(10),
            reservation_minutes: Self::DEFAULT_RESERVATION_MINUTES,
            sql_logging: false,
        }
    }

    /// Reads the configuration from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let mut config = Self::new(database_url);

        if let Some(n) = parse(&lookup, "DB_MAX_CONNECTIONS")? {
            config.max_connections = n;
        }
        if let Some(n) = parse(&lookup, "DB_MIN_CONNECTIONS")? {
            config.min_connections = n;
        }
        if let Some(secs) = parse(&lookup, "DB_IDLE_TIMEOUT_SECS")? {
            config.idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(secs) = parse(&lookup, "DB_MAX_LIFETIME_SECS")? {
            config.max_lifetime = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(ms) = parse(&lookup, "DB_ACQUIRE_TIMEOUT_MS")? {
            config.acquire_timeout = Duration::from_millis(ms);
        }
        if let Some(n) = parse(&lookup, "DB_CONNECT_RETRIES")? {
            config.connect_retries = n;
        }
        if let Some(ms) = parse(&lookup, "DB_RETRY_BACKOFF_MS")? {
            config.retry_backoff = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "DB_OPERATION_TIMEOUT_MS")? {
            config.operation_timeout = Duration::from_millis(ms);
        }
        if let Some(minutes) = parse::<i64, _>(&lookup, "RESERVATION_DURATION_MINUTES")? {
            if !(1..=MAX_RESERVATION_MINUTES).contains(&minutes) {
                return Err(ConfigError::Invalid {
                    var: "RESERVATION_DURATION_MINUTES",
                    value: minutes.to_string(),
                });
            }
            config.reservation_minutes = minutes;
        }
        if let Some(flag) = parse(&lookup, "DB_SQL_LOGGING")? {
            config.sql_logging = flag;
        }

        if config.min_connections > config.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS",
                value: config.min_connections.to_string(),
            });
        }

        Ok(config)
    }
}

fn parse<T: FromStr, F: Fn(&str) -> Option<String>>(
    lookup: &F,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            StoreConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(config, StoreConfig::new("sqlite::memory:"));
        assert_eq!(config.max_connections, 15);
        assert_eq!(config.min_connections, 5);
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(1800)));
        assert_eq!(config.reservation_minutes, 60);
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/coaching"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_MIN_CONNECTIONS", "1"),
            ("DB_IDLE_TIMEOUT_SECS", "0"),
            ("DB_OPERATION_TIMEOUT_MS", "250"),
            ("RESERVATION_DURATION_MINUTES", "90"),
            ("DB_SQL_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.idle_timeout, None);
        assert_eq!(config.operation_timeout, Duration::from_millis(250));
        assert_eq!(config.reservation_minutes, 90);
        assert!(config.sql_logging);
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(
            StoreConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = StoreConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                value: "many".to_string()
            }
        );

        assert!(
            StoreConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("RESERVATION_DURATION_MINUTES", "0"),
            ]))
            .is_err()
        );

        assert!(
            StoreConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("DB_MAX_CONNECTIONS", "2"),
                ("DB_MIN_CONNECTIONS", "3"),
            ]))
            .is_err()
        );
    }
}
