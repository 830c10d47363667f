use std::env;
use std::time::Duration;
use tracing::warn;

use crate::error::AppError;

pub const DEV_DATABASE_URL: &str = "sqlite://events.db?mode=rwc";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Everything the connection cache needs to open the shared pool.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub retry_writes: bool,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 5,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(45),
            retry_writes: true,
        }
    }

    pub fn is_postgres(&self) -> bool {
        self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub database: DatabaseSettings,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            None | Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => {
                return Err(AppError::Configuration(format!("Unknown APP_ENV '{}'", other)));
            }
        };

        let url = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None if environment == Environment::Development => {
                warn!("DATABASE_URL not set, falling back to {} (development only)", DEV_DATABASE_URL);
                DEV_DATABASE_URL.to_string()
            }
            None => {
                return Err(AppError::Configuration("DATABASE_URL must be set in production".into()));
            }
        };

        let mut database = DatabaseSettings::new(url);
        database.max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", database.max_connections)?;
        database.min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", database.min_connections)?;
        database.connect_timeout = Duration::from_secs(parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", 10)?);
        database.idle_timeout = Duration::from_secs(parse_or(&lookup, "DB_IDLE_TIMEOUT_SECS", 45)?);
        database.retry_writes = parse_or(&lookup, "DB_RETRY_WRITES", database.retry_writes)?;

        if database.max_connections == 0 {
            return Err(AppError::Configuration("DB_MAX_CONNECTIONS must be at least 1".into()));
        }
        if database.min_connections > database.max_connections {
            return Err(AppError::Configuration(
                "DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".into(),
            ));
        }

        Ok(Self {
            environment,
            database,
            port: parse_or(&lookup, "PORT", 3000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} has an invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_development_falls_back_to_local_database() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.url, DEV_DATABASE_URL);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 5);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.database.idle_timeout, Duration::from_secs(45));
        assert!(config.database.retry_writes);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_production_requires_database_url() {
        let err = Config::from_lookup(lookup(&[("APP_ENV", "production")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let config = Config::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://db/events"),
        ]))
        .unwrap();
        assert!(config.database.is_postgres());
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let err = Config::from_lookup(lookup(&[
            ("DB_MIN_CONNECTIONS", "20"),
            ("DB_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));

        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
