//! Formatting macros for the per-level emission methods.
//!
//! Each macro interpolates its arguments with `format_args!` and forwards to
//! the matching `*f` method on the service.
//!
//! # Examples
//!
//! ```
//! use log_service::prelude::*;
//! use log_service::{debug, info, warning};
//!
//! let buffer = MemorySink::new();
//! let service = LogService::new();
//! service.set_output(buffer.clone());
//!
//! debug!(service, "format {}", "debugf");
//! info!(service, "listening on port {}", 8080);
//! warning!(service, "{} retries left", 2);
//! service.flush().unwrap();
//!
//! assert_eq!(buffer.lines().len(), 3);
//! ```

/// Log at an explicit level.
///
/// ```
/// # use log_service::prelude::*;
/// # let service = LogService::new();
/// # service.set_output(MemorySink::new());
/// use log_service::log;
/// log!(service, LogLevel::Info, "Simple message");
/// log!(service, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($service:expr, $level:expr, $($arg:tt)+) => {
        $service.log_fmt($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($service:expr, $($arg:tt)+) => {
        $service.debugf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($service:expr, $($arg:tt)+) => {
        $service.infof(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($service:expr, $($arg:tt)+) => {
        $service.warningf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($service:expr, $($arg:tt)+) => {
        $service.errorf(format_args!($($arg)+))
    };
}

/// Write a fatal message synchronously and exit the process with status 1.
///
/// ```no_run
/// # use log_service::prelude::*;
/// # let service = LogService::new();
/// use log_service::fatal;
/// fatal!(service, "cannot bind {}", "0.0.0.0:80");
/// ```
#[macro_export]
macro_rules! fatal {
    ($service:expr, $($arg:tt)+) => {
        $service.fatalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LogService};
    use crate::sinks::MemorySink;

    #[test]
    fn test_macros_interpolate_positionally() {
        let buffer = MemorySink::new();
        let service = LogService::new();
        service.set_output(buffer.clone());

        debug!(service, "format {}", "debugf");
        info!(service, "format {}", "infof");
        warning!(service, "format {}", "warningf");
        error!(service, "format {} {}", "errorf", 2);
        log!(service, LogLevel::Info, "{1}-{0}", "b", "a");
        service.flush().unwrap();

        let contents = buffer.contents();
        assert!(contents.contains("| DEBUG | format debugf"));
        assert!(contents.contains("| INFO | format infof"));
        assert!(contents.contains("| WARNING | format warningf"));
        assert!(contents.contains("| ERROR | format errorf 2"));
        assert!(contents.contains("| INFO | a-b"));
    }
}
