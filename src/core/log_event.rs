//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// A single message captured at the call site.
///
/// Events are immutable once built and are consumed exactly once, either by
/// the writer thread or by the fatal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            level,
        }
    }

    /// Build an event from pre-interpolated format arguments
    pub fn from_args(level: LogLevel, args: std::fmt::Arguments<'_>) -> Self {
        Self::new(level, std::fmt::format(args))
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
