//! Basic log service usage example
//!
//! Demonstrates level filtering, formatted messages and a custom time layout.
//!
//! Run with: cargo run --example basic_usage

use log_service::prelude::*;
use log_service::{info, warning};

fn main() -> Result<()> {
    println!("=== Log Service - Basic Usage Example ===\n");

    let service = LogService::new();
    service
        .set_service_name("basic-usage")
        .set_level(LogLevel::Debug)
        .set_output(ConsoleSink::stdout());

    println!("1. Logging at every non-fatal level:");
    service.debug("This is a debug message");
    service.info("This is an info message");
    service.warning("This is a warning message");
    service.error("This is an error message");
    service.flush()?;

    println!("\n2. Raising the minimum level to WARNING:");
    service.set_level(LogLevel::Warning);
    service.debug("Debug message (hidden)");
    service.info("Info message (hidden)");
    warning!(service, "Disk usage at {}%", 91);
    service.flush()?;

    println!("\n3. Custom time layout:");
    service.set_level(LogLevel::Info).set_time_layout("%H:%M:%S");
    info!(service, "Listening on port {}", 8080);
    service.flush()?;

    // fatal() would write synchronously and exit with status 1
    service.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
