//! Typed configuration, read once at startup.
//!
//! Centralized here rather than read ad hoc inline, because both binaries
//! (`seatlock-api` and `seatlock-jobs`) and their tests need the same values.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Lock lease duration. Default 5 minutes.
    pub lock_ttl: Duration,
    /// Registry collection/key-prefix name.
    pub lock_table: String,
    /// Redis connection string backing the lock registry.
    pub registry_url: String,
    /// Postgres connection string backing the durable store.
    pub database_url: String,
    /// Bounded connection pool size, default 20.
    pub db_max_connections: u32,
    /// Store operation deadline, default 10s.
    pub store_deadline: Duration,
    /// Registry operation deadline, default 5s.
    pub registry_deadline: Duration,
    /// Optional endpoint the availability cache invalidation hook posts to.
    /// Absent means invalidation is a no-op.
    pub cache_invalidation_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Load configuration from the process environment. Call
    /// `dotenvy::dotenv().ok()` before this in `main` if a `.env` file should
    /// be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            lock_ttl: Duration::from_millis(env_parse_or("LOCK_TTL_MS", 300_000)?),
            lock_table: env::var("LOCK_TABLE").unwrap_or_else(|_| "seat-locks".to_string()),
            registry_url: env::var("REGISTRY_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            database_url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: env_parse_or::<u32>("DB_MAX_CONNECTIONS", 20)?,
            store_deadline: Duration::from_secs(env_parse_or("DB_DEADLINE_SECS", 10)?),
            registry_deadline: Duration::from_secs(env_parse_or("REGISTRY_DEADLINE_SECS", 5)?),
            cache_invalidation_url: env::var("CACHE_INVALIDATION_URL").ok(),
        })
    }
}

fn env_parse_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}
