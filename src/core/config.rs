//! Dispatcher configuration values

use super::overflow_policy::OverflowPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default period between drain ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Shortest allowed period between drain ticks; smaller values are raised to it
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Clamp a tick interval to [`MIN_TICK_INTERVAL`] and express it in whole milliseconds
pub(crate) fn clamp_tick_interval_ms(interval: Duration) -> u64 {
    let clamped = interval.max(MIN_TICK_INTERVAL);
    u64::try_from(clamped.as_millis()).unwrap_or(u64::MAX)
}

/// Plain, serializable logger settings
///
/// Missing fields take their defaults when deserialized, so a host
/// application can embed this in its own configuration format.
///
/// # Example
///
/// ```
/// use sink_logger::{LoggerConfig, OverflowPolicy};
///
/// let config = LoggerConfig {
///     tick_interval_ms: 0,
///     max_pending: Some(10_000),
///     overflow_policy: OverflowPolicy::DropOldest,
///     ..LoggerConfig::default()
/// }
/// .normalized();
///
/// assert_eq!(config.tick_interval_ms, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Milliseconds between drain ticks (minimum 1)
    pub tick_interval_ms: u64,

    /// Capacity of the pending queue; `None` means unbounded
    pub max_pending: Option<usize>,

    /// What to drop when a bounded queue is full
    pub overflow_policy: OverflowPolicy,

    /// Deliver everything still queued when the logger shuts down
    pub drain_on_shutdown: bool,
}

impl LoggerConfig {
    /// Apply the clamps: tick interval and capacity are at least 1
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        self.max_pending = self.max_pending.map(|n| n.max(1));
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: clamp_tick_interval_ms(DEFAULT_TICK_INTERVAL),
            max_pending: None,
            overflow_policy: OverflowPolicy::default(),
            drain_on_shutdown: true,
        }
    }
}
