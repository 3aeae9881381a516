//! Timestamp layouts
//!
//! Controls how the event timestamp is rendered in the second column of each
//! line. The default is RFC 1123 (`Mon, 02 Jan 2006 15:04:05 UTC`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Timestamp layout options
///
/// # Examples
///
/// ```
/// use log_service::TimeLayout;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
/// assert_eq!(TimeLayout::Rfc1123.format(&ts), "Mon, 02 Jan 2006 15:04:05 UTC");
/// assert_eq!(TimeLayout::from("%Y-%m-%d").format(&ts), "2006-01-02");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLayout {
    /// RFC 1123: `Mon, 02 Jan 2006 15:04:05 UTC`
    #[default]
    Rfc1123,

    /// RFC 3339: `2006-01-02T15:04:05+00:00`
    Rfc3339,

    /// ISO 8601 with milliseconds: `2006-01-02T15:04:05.000Z`
    Iso8601,

    /// Unix timestamp in seconds
    Unix,

    /// Unix timestamp in milliseconds
    UnixMillis,

    /// Custom strftime format
    ///
    /// A layout chrono cannot render falls back to RFC 1123 for that line
    /// rather than failing the write.
    Custom(String),
}

impl TimeLayout {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimeLayout::Rfc1123 => datetime.format(RFC1123).to_string(),
            TimeLayout::Rfc3339 => datetime.to_rfc3339(),
            TimeLayout::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimeLayout::Unix => datetime.timestamp().to_string(),
            TimeLayout::UnixMillis => datetime.timestamp_millis().to_string(),
            TimeLayout::Custom(layout) => {
                let mut out = String::new();
                // chrono reports unknown specifiers as a fmt::Error at render time
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return datetime.format(RFC1123).to_string();
                }
                out
            }
        }
    }

    /// Whether chrono accepts every specifier in this layout
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimeLayout::Custom(layout) => chrono::format::StrftimeItems::new(layout)
                .all(|item| !matches!(item, chrono::format::Item::Error)),
            _ => true,
        }
    }
}

impl From<&str> for TimeLayout {
    fn from(layout: &str) -> Self {
        TimeLayout::Custom(layout.to_string())
    }
}

impl From<String> for TimeLayout {
    fn from(layout: String) -> Self {
        TimeLayout::Custom(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_rfc1123_default() {
        assert_eq!(
            TimeLayout::default().format(&fixed_datetime()),
            "Mon, 02 Jan 2006 15:04:05 UTC"
        );
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(
            TimeLayout::Iso8601.format(&fixed_datetime()),
            "2006-01-02T15:04:05.123Z"
        );
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimeLayout::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2006-01-02T15:04:05"));
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimeLayout::Unix.format(&fixed_datetime()).parse().unwrap();
        let millis: i64 = TimeLayout::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        assert_eq!(secs, 1136214245);
        assert_eq!(millis, 1136214245123);
    }

    #[test]
    fn test_custom_format() {
        let layout = TimeLayout::from("%H:%M");
        assert!(layout.is_valid());
        assert_eq!(layout.format(&fixed_datetime()), "15:04");
    }

    #[test]
    fn test_invalid_custom_falls_back() {
        let layout = TimeLayout::from("%Q broken");
        assert!(!layout.is_valid());
        assert_eq!(
            layout.format(&fixed_datetime()),
            "Mon, 02 Jan 2006 15:04:05 UTC"
        );
    }
}
