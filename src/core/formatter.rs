//! Line formatting
//!
//! Every line has the fixed layout
//! `<service name> | <timestamp> | <LEVEL> | <message>\n`.

use super::{log_event::LogEvent, log_level::LogLevel, time_layout::TimeLayout};

pub const FIELD_SEPARATOR: &str = " | ";

/// Render a line from its already-formatted parts.
#[must_use]
pub fn format_line(service_name: &str, timestamp: &str, level: LogLevel, message: &str) -> String {
    let mut line = String::with_capacity(
        service_name.len() + timestamp.len() + message.len() + 3 * FIELD_SEPARATOR.len() + 8,
    );
    line.push_str(service_name);
    line.push_str(FIELD_SEPARATOR);
    line.push_str(timestamp);
    line.push_str(FIELD_SEPARATOR);
    line.push_str(level.label());
    line.push_str(FIELD_SEPARATOR);
    line.push_str(message);
    line.push('\n');
    line
}

/// Render an event with the given service name and timestamp layout.
#[must_use]
pub fn format_event(service_name: &str, layout: &TimeLayout, event: &LogEvent) -> String {
    format_line(
        service_name,
        &layout.format(&event.timestamp),
        event.level,
        &event.message,
    )
}
