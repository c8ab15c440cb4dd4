//! # Sink Logger
//!
//! An asynchronous, multi-sink log dispatcher.
//!
//! ## Features
//!
//! - **Non-blocking emit**: callers only enqueue; a worker thread drains the
//!   queue one entry per tick
//! - **Per-sink filtering**: minimum threshold, whitelist, blacklist and an
//!   expiration time after which the sink is removed automatically
//! - **Isolation**: a failing or panicking sink never affects the others
//! - **Call-site capture**: class, member and line of every entry
//!
//! ## Example
//!
//! ```
//! use sink_logger::prelude::*;
//! use sink_logger::warning;
//! use std::time::Duration;
//!
//! let mut logger = Logger::builder()
//!     .tick_interval(Duration::from_millis(10))
//!     .sink(ConsoleSink::new(SinkFilter::new(LogLevel::Warning)))
//!     .build();
//!
//! warning!(logger, "{} retries left", 2);
//! logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, OverflowCallback, OverflowPolicy, Result, Sink, SinkFilter, SinkId,
        TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::DebugStreamSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::TextFileSink;
}

pub use core::{
    format_line, CallSite, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, OverflowCallback, OverflowPolicy, Result, Sink, SinkExpiredCallback,
    SinkFailureCallback, SinkFilter, SinkId, TimestampFormat, CONSTRUCTOR_MEMBER,
    DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL,
};
#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
pub use sinks::DebugStreamSink;
#[cfg(feature = "file")]
pub use sinks::TextFileSink;
