//! Log level definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// All levels in ascending order of severity
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Level used when a caller supplies something that is not a level
    pub const FALLBACK: LogLevel = LogLevel::Error;

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Look up a level by ordinal value
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warning),
            3 => Some(LogLevel::Error),
            4 => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Ordinal lookup that never fails: unknown values become [`LogLevel::Error`]
    pub fn coerce(value: i64) -> Self {
        Self::from_ordinal(value).unwrap_or(Self::FALLBACK)
    }

    /// Name lookup that never fails: unknown names become [`LogLevel::Error`]
    pub fn coerce_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::FALLBACK)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Accepts either a level name or an ordinal; anything else becomes `Error`.
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Ordinal(i64),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Ordinal(value) => LogLevel::coerce(value),
            Raw::Name(name) => LogLevel::coerce_name(&name),
        })
    }
}
