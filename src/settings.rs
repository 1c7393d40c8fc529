//! Runtime settings read from the environment. `ENV=development` selects the
//! development database; any other value selects production.

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEV_DATABASE_URL: &str = "sqlite://hbnb_dev.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub environment: Environment,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("ENV").as_deref() {
            Some("development") => Environment::Development,
            _ => Environment::Production,
        };

        let database_url = match (lookup("DATABASE_URL"), environment) {
            (Some(url), _) if !url.trim().is_empty() => url,
            (_, Environment::Development) => DEV_DATABASE_URL.to_string(),
            (_, Environment::Production) => return Err(ConfigError::Missing("DATABASE_URL")),
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let default_connections = match environment {
            Environment::Development => 5,
            Environment::Production => 10,
        };
        let max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), default_connections)?;
        let body_limit = parse_or("BODY_LIMIT_BYTES", lookup("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?;

        Ok(Settings {
            environment,
            database_url,
            bind_addr,
            max_connections,
            body_limit,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
