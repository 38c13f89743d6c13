//! Service configuration read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Configuration error raised at startup
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL of the rental backend API, without trailing slash
    pub backend_api_url: String,
    /// Currency code attached to every amount in responses
    pub currency: String,
    pub catalog_cache_ttl: Duration,
    pub catalog_cache_capacity: u64,
    pub cache_warm_interval: Duration,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Build the configuration from environment variables, with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            backend_api_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            currency: env::var("CURRENCY").unwrap_or_else(|_| "RUB".to_string()),
            catalog_cache_ttl: Duration::from_secs(parse_var("CATALOG_CACHE_TTL_SECS", 5 * 60)?),
            catalog_cache_capacity: parse_var("CATALOG_CACHE_CAPACITY", 500)?,
            cache_warm_interval: Duration::from_secs(parse_var(
                "CACHE_WARM_INTERVAL_SECS",
                10 * 60,
            )?),
            upstream_timeout: Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", 5)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            backend_api_url: "http://localhost:8000/api".to_string(),
            currency: "RUB".to_string(),
            catalog_cache_ttl: Duration::from_secs(5 * 60),
            catalog_cache_capacity: 500,
            cache_warm_interval: Duration::from_secs(10 * 60),
            upstream_timeout: Duration::from_secs(5),
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError { key, value }),
        Err(_) => Ok(default),
    }
}
