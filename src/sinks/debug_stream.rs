//! Debug stream sink
//!
//! Diagnostic output meant for a developer watching the process, written to
//! stderr by default. In release builds it stays silent unless created with
//! [`DebugStreamSink::always`].

use crate::core::{format_line, LogEntry, Result, Sink, SinkFilter, TimestampFormat};
use std::io::{self, Write};

pub struct DebugStreamSink {
    filter: SinkFilter,
    writer: Box<dyn Write + Send>,
    enabled: bool,
    timestamp_format: TimestampFormat,
}

impl DebugStreamSink {
    /// Stderr sink that only writes in debug builds
    pub fn new(filter: SinkFilter) -> Self {
        Self::with_writer(filter, Box::new(io::stderr())).enabled(cfg!(debug_assertions))
    }

    /// Stderr sink that writes in every build profile
    pub fn always(filter: SinkFilter) -> Self {
        Self::with_writer(filter, Box::new(io::stderr()))
    }

    /// Sink writing to an arbitrary stream, enabled in every build profile
    pub fn with_writer(filter: SinkFilter, writer: Box<dyn Write + Send>) -> Self {
        Self {
            filter,
            writer,
            enabled: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Sink for DebugStreamSink {
    fn write(&mut self, entry: &LogEntry) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.writer, "{}", format_line(entry, &self.timestamp_format))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "debug_stream"
    }

    fn filter(&self) -> &SinkFilter {
        &self.filter
    }

    fn filter_mut(&mut self) -> &mut SinkFilter {
        &mut self.filter
    }
}
