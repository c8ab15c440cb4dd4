//! Log entry structure and call-site metadata

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::panic::Location;

/// Member name reported for call sites inside a constructor.
pub const CONSTRUCTOR_MEMBER: &str = "Constructor";

/// Rust's conventional constructor name.
const CONSTRUCTOR_TOKEN: &str = "new";

/// Where a log call was made: class (module or type), member and line.
///
/// Names are normalized on construction:
///
/// - a class given as a file path keeps only the file name up to its first
///   `.` (`src/net/server.rs` becomes `server`)
/// - a member given as a function path keeps its last segment, ignoring
///   `{{closure}}` frames
/// - a member named `new` is reported as [`CONSTRUCTOR_MEMBER`]
///
/// # Example
///
/// ```
/// use sink_logger::CallSite;
///
/// let site = CallSite::new("src/net/server.rs", "app::net::Server::new", 42);
/// assert_eq!(site.class(), "server");
/// assert_eq!(site.member(), "Constructor");
/// assert_eq!(site.line(), 42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    class: String,
    member: String,
    line: u32,
}

impl CallSite {
    pub fn new(class: impl AsRef<str>, member: impl AsRef<str>, line: u32) -> Self {
        Self {
            class: class_from_path(class.as_ref()),
            member: member_from_path(member.as_ref()),
            line,
        }
    }

    /// Call site of the caller, taken from `#[track_caller]` location data.
    ///
    /// The member name is not available this way and is left empty; use the
    /// [`call_site!`](crate::call_site) macro to capture it as well.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), "", location.line())
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

fn class_from_path(path: &str) -> String {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    file_name.split('.').next().unwrap_or(file_name).to_string()
}

fn member_from_path(path: &str) -> String {
    let member = path
        .rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or("");

    if member == CONSTRUCTOR_TOKEN {
        CONSTRUCTOR_MEMBER.to_string()
    } else {
        member.to_string()
    }
}

/// One logging event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    level: LogLevel,
    timestamp: DateTime<Utc>,
    source_class: String,
    source_member: String,
    source_line: u32,
    message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    ///
    /// The logger never enqueues entries at [`LogLevel::None`]; constructing
    /// one directly is allowed but no sink filter will ever see it.
    pub fn new(level: LogLevel, call_site: CallSite, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            source_class: call_site.class,
            source_member: call_site.member,
            source_line: call_site.line,
            message: message.into(),
        }
    }

    /// Replace the creation timestamp (useful for replaying recorded events)
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn source_class(&self) -> &str {
        &self.source_class
    }

    pub fn source_member(&self) -> &str {
        &self.source_member
    }

    #[inline]
    pub fn source_line(&self) -> u32 {
        self.source_line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_from_unix_and_windows_paths() {
        assert_eq!(CallSite::new("src/core/logger.rs", "run", 1).class(), "logger");
        assert_eq!(
            CallSite::new(r"C:\work\service\src\worker.rs", "run", 1).class(),
            "worker"
        );
        assert_eq!(CallSite::new("Worker", "run", 1).class(), "Worker");
    }

    #[test]
    fn test_member_from_function_path() {
        let site = CallSite::new("a.rs", "app::worker::Worker::run::{{closure}}", 7);
        assert_eq!(site.member(), "run");

        let site = CallSite::new("a.rs", "process", 7);
        assert_eq!(site.member(), "process");
    }

    #[test]
    fn test_constructor_member_is_renamed() {
        let site = CallSite::new("a.rs", "app::Worker::new", 3);
        assert_eq!(site.member(), CONSTRUCTOR_MEMBER);

        // Only the exact token is renamed
        let site = CallSite::new("a.rs", "app::Worker::new_with", 3);
        assert_eq!(site.member(), "new_with");
    }

    #[test]
    fn test_caller_location() {
        let line = line!() + 1;
        let site = CallSite::caller();
        assert_eq!(site.class(), "log_entry");
        assert_eq!(site.member(), "");
        assert_eq!(site.line(), line);
    }

    #[test]
    fn test_entry_captures_call_site() {
        let before = Utc::now();
        let entry = LogEntry::new(
            LogLevel::Warning,
            CallSite::new("src/db/pool.rs", "db::Pool::acquire", 88),
            "pool exhausted",
        );

        assert_eq!(entry.level(), LogLevel::Warning);
        assert_eq!(entry.source_class(), "pool");
        assert_eq!(entry.source_member(), "acquire");
        assert_eq!(entry.source_line(), 88);
        assert_eq!(entry.message(), "pool exhausted");
        assert!(entry.timestamp() >= before);
    }
}
