//! Text rendering shared by the bundled sinks
//!
//! Lines look like `[LEVEL][time][Class.Member Line N]: message`. The
//! layout is a convenience for humans, not a stable format.

use super::log_entry::LogEntry;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp rendering options
///
/// # Examples
///
/// ```
/// use sink_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// assert!(format.format(&Utc::now()).ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall-clock time: `10:30:45`
    #[default]
    LongTime,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in local time
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::LongTime => datetime.with_timezone(&Local).format("%H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // Invalid strftime specifiers fail at render time
                if write!(out, "{}", datetime.with_timezone(&Local).format(format_str)).is_err() {
                    out = datetime.to_rfc3339();
                }
                out
            }
        }
    }
}

/// Escape line breaks and tabs so one entry always renders as one line
fn escape_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render an entry as a single text line (without a trailing newline)
///
/// An entry without a member name renders its source as `[Class Line N]`.
pub fn format_line(entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
    let source = match entry.source_member() {
        "" => entry.source_class().to_string(),
        member => format!("{}.{}", entry.source_class(), member),
    };

    format!(
        "[{}][{}][{} Line {}]: {}",
        entry.level(),
        timestamp_format.format(&entry.timestamp()),
        source,
        entry.source_line(),
        escape_message(entry.message())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogLevel};
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(
            LogLevel::Warning,
            CallSite::new("src/cache/store.rs", "cache::Store::evict", 17),
            message,
        )
        .with_timestamp(fixed_datetime())
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_unix_millis_format() {
        let result = TimestampFormat::UnixMillis.format(&fixed_datetime());
        assert_eq!(result, "1736332245123");
    }

    #[test]
    fn test_long_time_shape() {
        let result = TimestampFormat::LongTime.format(&fixed_datetime());
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
        assert!(result.ends_with(":45"));
    }

    #[test]
    fn test_invalid_custom_format_falls_back() {
        let result = TimestampFormat::Custom("%Q".to_string()).format(&fixed_datetime());
        assert_eq!(result, fixed_datetime().to_rfc3339());
    }

    #[test]
    fn test_format_line() {
        let line = format_line(&entry("cache full"), &TimestampFormat::Iso8601);
        assert_eq!(
            line,
            "[WARNING][2025-01-08T10:30:45.123Z][store.evict Line 17]: cache full"
        );
    }

    #[test]
    fn test_format_line_without_member() {
        let entry = LogEntry::new(LogLevel::Error, CallSite::new("src/main.rs", "", 12), "boom")
            .with_timestamp(fixed_datetime());
        let line = format_line(&entry, &TimestampFormat::UnixMillis);
        assert_eq!(line, "[ERROR][1736332245123][main Line 12]: boom");
    }

    #[test]
    fn test_format_line_escapes_line_breaks() {
        let line = format_line(&entry("a\nb\r\tc"), &TimestampFormat::UnixMillis);
        assert!(line.ends_with(": a\\nb\\r\\tc"));
        assert_eq!(line.lines().count(), 1);
    }
}
