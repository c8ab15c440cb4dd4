//! Sink trait and per-sink filtering policy

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filtering configuration owned by every sink.
///
/// Decision order for an entry at level `L`:
///
/// 1. `L` in the blacklist: dropped
/// 2. `L` in the whitelist: delivered
/// 3. `L >= threshold`: delivered
/// 4. otherwise dropped
///
/// A threshold of [`LogLevel::None`] therefore lets through whitelisted
/// levels only.
///
/// # Example
///
/// ```
/// use sink_logger::{LogLevel, SinkFilter};
///
/// let mut filter = SinkFilter::new(LogLevel::Critical);
/// filter.set_whitelist(Some([LogLevel::Trace]));
///
/// assert!(filter.accepts(LogLevel::Trace));
/// assert!(!filter.accepts(LogLevel::Error));
/// assert!(filter.accepts(LogLevel::Critical));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkFilter {
    threshold: LogLevel,
    whitelist: BTreeSet<LogLevel>,
    blacklist: BTreeSet<LogLevel>,
    expires_at: DateTime<Utc>,
}

impl SinkFilter {
    /// Sentinel meaning "never expires"
    pub const NEVER_EXPIRES: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

    /// Filter with the given threshold, empty lists and no expiration
    pub fn new(threshold: LogLevel) -> Self {
        Self {
            threshold,
            whitelist: BTreeSet::new(),
            blacklist: BTreeSet::new(),
            expires_at: Self::NEVER_EXPIRES,
        }
    }

    #[must_use]
    pub fn with_whitelist<I: IntoIterator<Item = LogLevel>>(mut self, levels: I) -> Self {
        self.set_whitelist(Some(levels));
        self
    }

    #[must_use]
    pub fn with_blacklist<I: IntoIterator<Item = LogLevel>>(mut self, levels: I) -> Self {
        self.set_blacklist(Some(levels));
        self
    }

    #[must_use]
    pub fn with_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.set_expires_at(Some(expires_at));
        self
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    pub fn whitelist(&self) -> &BTreeSet<LogLevel> {
        &self.whitelist
    }

    /// Replace the whitelist; `None` clears it
    pub fn set_whitelist<I: IntoIterator<Item = LogLevel>>(&mut self, levels: Option<I>) {
        self.whitelist = levels.map(|l| l.into_iter().collect()).unwrap_or_default();
    }

    pub fn blacklist(&self) -> &BTreeSet<LogLevel> {
        &self.blacklist
    }

    /// Replace the blacklist; `None` clears it
    pub fn set_blacklist<I: IntoIterator<Item = LogLevel>>(&mut self, levels: Option<I>) {
        self.blacklist = levels.map(|l| l.into_iter().collect()).unwrap_or_default();
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Set the expiration instant; `None` means never expire
    pub fn set_expires_at(&mut self, expires_at: Option<DateTime<Utc>>) {
        self.expires_at = expires_at.unwrap_or(Self::NEVER_EXPIRES);
    }

    pub fn never_expires(&self) -> bool {
        self.expires_at == Self::NEVER_EXPIRES
    }

    /// Whether the expiration instant has been reached at `now`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Filtering decision for an entry at `level`
    pub fn accepts(&self, level: LogLevel) -> bool {
        if !level.is_entry_level() || self.blacklist.contains(&level) {
            return false;
        }
        self.whitelist.contains(&level) || level >= self.threshold
    }
}

impl Default for SinkFilter {
    fn default() -> Self {
        Self::new(LogLevel::Trace)
    }
}

/// A configured consumer of log entries.
///
/// Implementations own a [`SinkFilter`]; the logger consults it on the
/// worker thread before every `write`. `write` is only ever called from the
/// logger's worker, one entry at a time.
pub trait Sink: Send {
    fn write(&mut self, entry: &LogEntry) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;

    fn filter(&self) -> &SinkFilter;

    fn filter_mut(&mut self) -> &mut SinkFilter;
}
