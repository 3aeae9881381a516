//! Service configuration
//!
//! Holds everything a [`LogService`](super::LogService) needs except the sink.
//! Can be built in code, parsed from JSON, or read from the environment.

use super::{error::Result, log_level::LogLevel, time_layout::TimeLayout};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_NAME: &str = "logger";

pub const ENV_SERVICE_NAME: &str = "LOG_SERVICE_NAME";
pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_TIME_LAYOUT: &str = "LOG_TIME_LAYOUT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogServiceConfig {
    pub service_name: String,
    pub time_layout: TimeLayout,
    pub min_level: LogLevel,
}

impl Default for LogServiceConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            time_layout: TimeLayout::default(),
            min_level: LogLevel::Debug,
        }
    }
}

impl LogServiceConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use log_service::{LogLevel, LogServiceConfig};
    ///
    /// let config = LogServiceConfig::from_json(r#"{"service_name": "api", "min_level": "info"}"#)
    ///     .unwrap();
    /// assert_eq!(config.service_name, "api");
    /// assert_eq!(config.min_level, LogLevel::Info);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from `LOG_SERVICE_NAME`, `LOG_LEVEL` and `LOG_TIME_LAYOUT`.
    ///
    /// `LOG_LEVEL` may be a name or an ordinal; anything unrecognised becomes
    /// `Error`, same as [`LogService::set_level_name`](super::LogService::set_level_name).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_SERVICE_NAME) {
            config.service_name = name;
        }
        if let Some(level) = lookup(ENV_LEVEL) {
            config.min_level = match level.trim().parse::<i64>() {
                Ok(ordinal) => LogLevel::coerce(ordinal),
                Err(_) => LogLevel::coerce_name(&level),
            };
        }
        if let Some(layout) = lookup(ENV_TIME_LAYOUT) {
            config.time_layout = TimeLayout::from(layout);
        }

        config
    }

    #[must_use = "builder methods return a new value"]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_layout(mut self, layout: impl Into<TimeLayout>) -> Self {
        self.time_layout = layout.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}
