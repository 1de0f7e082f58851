//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection retries before giving up at startup
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Prefix for every key written by this service
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Override fields from `REDIS_URL` and `REDIS_KEY_PREFIX`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            url: env_or("REDIS_URL", fallback.url),
            key_prefix: env_or("REDIS_KEY_PREFIX", fallback.key_prefix),
            ..fallback
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_key_prefix() -> String {
    String::from("notekeep")
}
