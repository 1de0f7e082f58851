//! Verification handshake configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where verification records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// MySQL table
    MySql,
    /// Redis keys with native TTL
    Redis,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Verification configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Storage backend for verification records
    pub storage: StorageBackend,

    /// Validity of password reset codes in seconds
    pub reset_password_period_seconds: i64,

    /// Validity of signup codes in seconds
    pub onboarding_period_seconds: i64,

    /// How often expired records are swept (0 disables the sweep)
    pub cleanup_interval_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            reset_password_period_seconds: 10 * 60,
            onboarding_period_seconds: 10 * 60,
            cleanup_interval_seconds: 300,
        }
    }
}

impl VerificationConfig {
    /// Override fields from `VERIFICATION_STORAGE` and
    /// `VERIFICATION_CLEANUP_INTERVAL`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            storage: env_or("VERIFICATION_STORAGE", fallback.storage),
            cleanup_interval_seconds: env_or(
                "VERIFICATION_CLEANUP_INTERVAL",
                fallback.cleanup_interval_seconds,
            ),
            ..fallback
        }
    }
}
