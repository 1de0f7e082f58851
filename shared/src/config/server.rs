//! HTTP listener settings

use serde::{Deserialize, Serialize};

use super::env_or;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Actix workers; 0 lets actix pick one per core
    #[serde(default)]
    pub workers: usize,

    /// Public origin used to build links in outgoing emails
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            base_url: default_base_url(),
        }
    }
}

impl ServerConfig {
    /// Listener on `host:port` whose links point back at itself
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        Self {
            base_url: format!("http://{}:{}", host, port),
            host,
            port,
            ..Default::default()
        }
    }

    /// Override fields from `SERVER_HOST`, `SERVER_PORT`, `SERVER_WORKERS`
    /// and `APP_BASE_URL`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            host: env_or("SERVER_HOST", fallback.host),
            port: env_or("SERVER_PORT", fallback.port),
            workers: env_or("SERVER_WORKERS", fallback.workers),
            base_url: env_or("APP_BASE_URL", fallback.base_url),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_base_url() -> String {
    String::from("http://localhost:8080")
}
