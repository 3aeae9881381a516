//! # Log Service
//!
//! A minimal leveled logging service. Producers on any thread hand events to
//! a single writer thread, which filters them by minimum level, formats them
//! as `service | timestamp | LEVEL | message` and writes them to one sink.
//!
//! ## Features
//!
//! - **Ordered output**: one writer per service, lines never interleave
//! - **Back-pressure**: every non-fatal call waits until the writer takes it
//! - **Fatal path**: synchronous write and flush, then exit with status 1
//! - **Fail-fast sinks**: a sink write failure terminates the process
//!
//! ## Example
//!
//! ```
//! use log_service::prelude::*;
//! use log_service::info;
//!
//! let buffer = MemorySink::new();
//! let service = LogService::new();
//! service
//!     .set_service_name("billing")
//!     .set_level(LogLevel::Info)
//!     .set_output(buffer.clone());
//!
//! info!(service, "charged {} cents", 250);
//! service.flush().unwrap();
//!
//! assert!(buffer.contents().starts_with("billing | "));
//! assert!(buffer.contents().ends_with("| INFO | charged 250 cents\n"));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
    pub use crate::core::{
        LogEvent, LogLevel, LogService, LogServiceConfig, LogServiceError, Result,
        ServiceMetrics, Sink, TimeLayout, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
pub use crate::core::{
    format_event, format_line, LogEvent, LogLevel, LogService, LogServiceConfig, LogServiceError,
    Result, ServiceMetrics, Sink, TimeLayout, DEFAULT_SHUTDOWN_TIMEOUT, FAILURE_EXIT_CODE,
    FATAL_EXIT_CODE,
};
