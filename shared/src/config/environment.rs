//! Deployment environment and logging settings

use serde::{Deserialize, Serialize};
use std::env;

use super::env_or;

/// Crates whose debug output drowns the application's own events
const QUIET_TARGETS: [&str; 3] = ["sqlx", "hyper", "rustls"];

/// Where the server runs; selects presets and the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Read `NK_ENV`, falling back to `ENVIRONMENT`
    ///
    /// Unset or unknown values mean development.
    pub fn from_env() -> Self {
        env::var("NK_ENV")
            .or_else(|_| env::var("ENVIRONMENT"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Optional TOML file layered over the preset, e.g. `config.staging.toml`
    pub fn config_file(&self) -> String {
        format!("config.{}.toml", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level for the application's own events (trace, debug, info, warn, error)
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors for the pretty and compact formats
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// Include file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::default(),
            colored: default_colored(),
            source_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                colored: true,
                source_location: true,
            },
            Environment::Staging => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
            Environment::Production => Self {
                level: String::from("warn"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
        }
    }

    /// Override fields from `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_env_or(fallback: Self) -> Self {
        Self {
            level: env_or("LOG_LEVEL", fallback.level),
            format: env_or("LOG_FORMAT", fallback.format),
            ..fallback
        }
    }

    /// `EnvFilter` directive for `level`
    ///
    /// Database, HTTP and TLS internals are held at `warn` unless the level
    /// is already stricter.
    pub fn filter_directive(&self) -> String {
        let level = self.level.trim().to_lowercase();
        if matches!(level.as_str(), "warn" | "error" | "off") {
            return level;
        }
        let mut directive = level;
        for target in QUIET_TARGETS {
            directive.push_str(&format!(",{}=warn", target));
        }
        directive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

fn default_colored() -> bool {
    true
}
