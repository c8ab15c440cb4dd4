//! Expiring sink example
//!
//! A sink with an expiration instant receives entries until it expires and is
//! then removed from the logger by the worker.
//!
//! Run with: cargo run --example expiring_sinks

use chrono::Utc;
use sink_logger::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    println!("=== Sink Logger - Expiring Sinks Example ===\n");

    let temporary = ConsoleSink::new(
        SinkFilter::new(LogLevel::Trace)
            .with_expiration(Utc::now() + chrono::Duration::milliseconds(300)),
    );
    let permanent = DebugStreamSink::always(SinkFilter::new(LogLevel::Warning));

    let mut logger = Logger::builder()
        .tick_interval(Duration::from_millis(20))
        .sink(temporary)
        .sink(permanent)
        .on_sink_expired(Arc::new(|id, name| {
            println!("-> {} ({}) expired and was removed", id, name);
        }))
        .build();

    for i in 0..10 {
        logger.warning(format!("Tick {} with {} sinks", i, logger.sink_count()));
        std::thread::sleep(Duration::from_millis(60));
    }

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    let metrics = logger.metrics();
    println!(
        "\nDispatched {} entries, {} deliveries, {} sinks expired",
        metrics.entries_dispatched(),
        metrics.deliveries(),
        metrics.sinks_expired()
    );
}
