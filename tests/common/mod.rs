//! Sinks and helpers shared by the integration test binaries
#![allow(dead_code)]

use parking_lot::Mutex;
use sink_logger::{LogEntry, LogLevel, LoggerError, Result, Sink, SinkFilter};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type Received = Arc<Mutex<Vec<LogEntry>>>;

/// Keeps a copy of every entry written to it
pub struct RecordingSink {
    filter: SinkFilter,
    received: Received,
}

impl RecordingSink {
    pub fn new(filter: SinkFilter) -> (Self, Received) {
        let received = Received::default();
        (
            Self {
                filter,
                received: Arc::clone(&received),
            },
            received,
        )
    }

    pub fn boxed(filter: SinkFilter) -> (Box<dyn Sink>, Received) {
        let (sink, received) = Self::new(filter);
        (Box::new(sink), received)
    }
}

impl Sink for RecordingSink {
    fn write(&mut self, entry: &LogEntry) -> Result<()> {
        self.received.lock().push(entry.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn filter(&self) -> &SinkFilter {
        &self.filter
    }

    fn filter_mut(&mut self) -> &mut SinkFilter {
        &mut self.filter
    }
}

/// Rejects every write
pub struct FailingSink {
    filter: SinkFilter,
}

impl FailingSink {
    pub fn new() -> Self {
        Self {
            filter: SinkFilter::new(LogLevel::Trace),
        }
    }
}

impl Sink for FailingSink {
    fn write(&mut self, _entry: &LogEntry) -> Result<()> {
        Err(LoggerError::writer("device unavailable"))
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn filter(&self) -> &SinkFilter {
        &self.filter
    }

    fn filter_mut(&mut self) -> &mut SinkFilter {
        &mut self.filter
    }
}

pub fn levels(received: &Received) -> Vec<LogLevel> {
    received.lock().iter().map(LogEntry::level).collect()
}

/// Poll `condition` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
