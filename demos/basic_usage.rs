//! Basic logger usage example
//!
//! Demonstrates a console sink, per-sink filtering and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use sink_logger::prelude::*;
use sink_logger::{critical, debug, information, trace, warning};
use std::time::Duration;

struct Server {
    port: u16,
}

impl Server {
    fn new(logger: &Logger, port: u16) -> Self {
        // Reported as "basic_usage.Constructor"
        information!(logger, "Server configured for port {}", port);
        Self { port }
    }

    fn serve(&self, logger: &Logger) {
        warning!(logger, "Port {} is open to every interface", self.port);
    }
}

fn main() -> Result<()> {
    println!("=== Sink Logger - Basic Usage Example ===\n");

    let mut logger = Logger::builder()
        .tick_interval(Duration::from_millis(10))
        .sink(ConsoleSink::new(SinkFilter::new(LogLevel::Trace)))
        .build();
    let console = logger.sink_ids()[0];

    println!("1. Logging at every level:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    information!(logger, "This is an information message");
    warning!(logger, "This is a warning message");
    logger.error("This is an error message");
    critical!(logger, "This is a critical message");
    std::thread::sleep(Duration::from_millis(200));

    println!("\n2. Raising the console threshold to WARNING:");
    logger.configure_sink(console, |filter| filter.set_threshold(LogLevel::Warning));
    let server = Server::new(&logger, 8080);
    server.serve(&logger);
    std::thread::sleep(Duration::from_millis(100));

    println!("\n3. Whitelisting DEBUG and blacklisting CRITICAL:");
    logger.configure_sink(console, |filter| {
        filter.set_whitelist(Some([LogLevel::Debug]));
        filter.set_blacklist(Some([LogLevel::Critical]));
    });
    debug!(logger, "Debug message (visible through the whitelist)");
    information!(logger, "Information message (hidden)");
    critical!(logger, "Critical message (hidden by the blacklist)");

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
