//! File logging example
//!
//! Demonstrates a text file sink next to a console sink with different filters.
//!
//! Run with: cargo run --example file_logging

use sink_logger::prelude::*;
use sink_logger::{error, information, warning};
use std::fs;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Sink Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("sink_logger_demo");
    fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("application.log");

    let file_sink = TextFileSink::new(&log_file, SinkFilter::new(LogLevel::Debug))?
        .with_timestamp_format(TimestampFormat::Iso8601);
    let console_sink = ConsoleSink::new(SinkFilter::new(LogLevel::Error));

    let mut logger = Logger::builder()
        .tick_interval(Duration::from_millis(5))
        .sink(file_sink)
        .sink(console_sink)
        .build();

    println!("1. Writing to {}:", log_file.display());
    information!(logger, "Application started");
    warning!(logger, "Cache size is {} MB, above the recommended limit", 512);
    error!(logger, "Failed to reach {}\nretrying", "db.internal");
    logger.debug("Debug entries only go to the file");

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n2. File contents:");
    for line in fs::read_to_string(&log_file)?.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
