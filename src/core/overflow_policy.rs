//! Overflow policies for a bounded pending queue
//!
//! The pending queue is unbounded unless a capacity is configured. With a
//! capacity, these policies decide which entry is lost when it is full.
//! Emitting never blocks under either policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Policy for handling a full pending queue
///
/// # Example
///
/// ```
/// use sink_logger::OverflowPolicy;
///
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::DropNewest);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Discard the entry being emitted
    #[default]
    DropNewest,

    /// Evict the oldest pending entry to make room for the new one
    DropOldest,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
        }
    }
}

/// Callback type for overflow notifications
///
/// Called on the first drop and every 1000th after it, with the total
/// number of dropped entries so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
