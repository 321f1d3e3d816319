//! Layered configuration.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`PLANNER_*`, `__` separates sections)
//! 2. The TOML file named by `--config` / `PLANNER_CONFIG`, else `./planner.toml`
//! 3. Built-in defaults
//!
//! `PLANNER_PRODUCER__ENDPOINT` maps to `producer.endpoint`,
//! `PLANNER_PLANNING__DEFAULT_TOTAL_DAYS` to `planning.default_total_days`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use crate::schedule::MAX_TOTAL_DAYS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "planner.toml";
pub const CONFIG_PATH_ENV: &str = "PLANNER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Remote task producer URL. Without one, plans come from the templates.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Budget used when a request names neither a day count nor a due date.
    pub default_total_days: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            default_total_days: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub producer: ProducerConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl PlannerConfig {
    /// Loads from the default file location (or `PLANNER_CONFIG`) plus the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load), but an explicit path replaces the file lookup.
    /// An explicit path that does not exist is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path)?.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::InvalidValue {
                        field: "config".to_string(),
                        reason: format!("{} does not exist", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => std::env::var_os(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)))
                .filter(|p| p.exists()),
        };
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading config file");
            figment = figment.merge(Toml::file(file));
        }

        Ok(figment.merge(Env::prefixed("PLANNER_").ignore(&["config", "log"]).split("__")))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let days = self.planning.default_total_days;
        if !days.is_finite() || days <= 0.0 || days > MAX_TOTAL_DAYS {
            return Err(ConfigError::InvalidValue {
                field: "planning.default_total_days".to_string(),
                reason: format!("must be a number of days in (0, {MAX_TOTAL_DAYS}] (got {days})"),
            });
        }
        if self.producer.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "producer.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
