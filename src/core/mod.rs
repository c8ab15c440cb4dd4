//! Core logger types and traits

pub mod config;
pub mod error;
pub mod format;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod registry;
pub mod sink;

pub use config::{LoggerConfig, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL};
pub use error::{LoggerError, Result};
pub use format::{format_line, TimestampFormat};
pub use log_entry::{CallSite, LogEntry, CONSTRUCTOR_MEMBER};
pub use log_level::LogLevel;
pub use logger::{
    Logger, LoggerBuilder, SinkExpiredCallback, SinkFailureCallback, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use registry::SinkId;
pub use sink::{Sink, SinkFilter};
