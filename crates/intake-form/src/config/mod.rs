use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::intake::persistence::{validate_key, SNAPSHOT_KEY};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub snapshot: SnapshotConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dir = env::var("INTAKE_SNAPSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".intake"));
        let key = env::var("INTAKE_SNAPSHOT_KEY").unwrap_or_else(|_| SNAPSHOT_KEY.to_string());
        if validate_key(&key).is_err() {
            return Err(ConfigError::InvalidSnapshotKey { key });
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            snapshot: SnapshotConfig { dir, key },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the autosaved form lives.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub dir: PathBuf,
    pub key: String,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSnapshotKey { key: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSnapshotKey { key } => write!(
                f,
                "INTAKE_SNAPSHOT_KEY must be a plain file stem without separators (got {key:?})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
