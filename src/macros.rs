//! Logging macros for ergonomic log message formatting.
//!
//! These macros capture the full call site (file, enclosing function and
//! line) and accept `format!`-style arguments.
//!
//! # Examples
//!
//! ```
//! use sink_logger::prelude::*;
//! use sink_logger::info;
//!
//! let logger = Logger::builder().build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Capture the [`CallSite`](crate::CallSite) of the invocation.
///
/// The class is the current file name without extension, the member is the
/// enclosing function (`new` reported as `Constructor`).
///
/// # Examples
///
/// ```
/// use sink_logger::call_site;
///
/// fn handle_request() -> sink_logger::CallSite {
///     call_site!()
/// }
///
/// let site = handle_request();
/// assert_eq!(site.member(), "handle_request");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        let name = ::std::any::type_name_of_val(&__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        $crate::CallSite::new(file!(), name, line!())
    }};
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use sink_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use sink_logger::log;
/// log!(logger, LogLevel::Information, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::call_site!(), format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
///
/// # Examples
///
/// ```
/// # use sink_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use sink_logger::information;
/// information!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! information {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Shorthand for [`information!`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Shorthand for [`warning!`].
///
/// # Examples
///
/// ```
/// # use sink_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use sink_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use sink_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use sink_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}
