//! Core log service types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod service;
pub mod sink;
pub mod time_layout;

pub use config::LogServiceConfig;
pub use error::{LogServiceError, Result};
pub use formatter::{format_event, format_line};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use metrics::ServiceMetrics;
pub use service::{LogService, DEFAULT_SHUTDOWN_TIMEOUT, FAILURE_EXIT_CODE, FATAL_EXIT_CODE};
pub use sink::Sink;
pub use time_layout::TimeLayout;
