//! Configuration for the creditdesk stores
//!
//! Settings come from an optional TOML file, then environment overrides:
//!
//! - `CREDITDESK_STORAGE_TYPE`: `file` or `memory`
//! - `CREDITDESK_STORAGE_DIR`: base directory for the file backend
//! - `CREDITDESK_SESSION_LATENCY`: simulated login/register latency (`1s`, `250ms`)
//! - `CREDITDESK_APPLICATION_LATENCY`: simulated submission latency
//!
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{DeskError, ErrorCode};
use crate::storage::StorageConfig;
use crate::LibResult;

pub const ENV_STORAGE_TYPE: &str = "CREDITDESK_STORAGE_TYPE";
pub const ENV_STORAGE_DIR: &str = "CREDITDESK_STORAGE_DIR";
pub const ENV_SESSION_LATENCY: &str = "CREDITDESK_SESSION_LATENCY";
pub const ENV_APPLICATION_LATENCY: &str = "CREDITDESK_APPLICATION_LATENCY";

/// Key of the persisted user record
pub const DEFAULT_RECORD_KEY: &str = "user";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub applications: ApplicationSettings,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Session store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Simulated round-trip latency for login and register
    #[serde(with = "humantime_serde", default = "default_session_latency")]
    pub latency: Duration,

    /// Reject a login/register while another one is outstanding
    #[serde(default)]
    pub reject_concurrent: bool,

    /// Storage key holding the persisted user
    #[serde(default = "default_record_key")]
    pub record_key: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            latency: default_session_latency(),
            reject_concurrent: false,
            record_key: default_record_key(),
        }
    }
}

/// Application store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSettings {
    /// Simulated submission latency
    #[serde(with = "humantime_serde", default = "default_application_latency")]
    pub latency: Duration,

    /// Reject a submission while another one is outstanding
    #[serde(default)]
    pub reject_concurrent: bool,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            latency: default_application_latency(),
            reject_concurrent: false,
        }
    }
}

fn default_session_latency() -> Duration {
    Duration::from_millis(1000)
}

fn default_application_latency() -> Duration {
    Duration::from_millis(1500)
}

fn default_record_key() -> String {
    DEFAULT_RECORD_KEY.to_string()
}

impl DeskConfig {
    /// Load configuration from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> LibResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> LibResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DeskError::configuration_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Cannot read {}", path.display()),
            )
            .with_source(e)
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Parse TOML configuration text
    pub fn from_toml_str(contents: &str) -> LibResult<Self> {
        toml::from_str(contents).map_err(|e| {
            DeskError::configuration_with_code(
                ErrorCode::CONFIG_PARSE_ERROR,
                "Invalid configuration file",
            )
            .with_source(e)
        })
    }

    /// Apply overrides read through `lookup`
    ///
    /// `lookup` stands in for the environment so overrides can be tested
    /// without mutating process state.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> LibResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STORAGE_TYPE) {
            self.storage.backend = value
                .parse()
                .map_err(|e: String| invalid_value(ENV_STORAGE_TYPE, e))?;
        }
        if let Some(value) = lookup(ENV_STORAGE_DIR) {
            self.storage.base_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_SESSION_LATENCY) {
            self.session.latency = parse_latency(ENV_SESSION_LATENCY, &value)?;
        }
        if let Some(value) = lookup(ENV_APPLICATION_LATENCY) {
            self.applications.latency = parse_latency(ENV_APPLICATION_LATENCY, &value)?;
        }
        Ok(())
    }
}

fn parse_latency(name: &str, value: &str) -> LibResult<Duration> {
    humantime_serde::re::humantime::parse_duration(value)
        .map_err(|e| invalid_value(name, e.to_string()))
}

fn invalid_value(name: &str, reason: impl std::fmt::Display) -> DeskError {
    DeskError::configuration_with_code(
        ErrorCode::CONFIG_INVALID_VALUE,
        format!("{}: {}", name, reason),
    )
}
