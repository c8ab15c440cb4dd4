//! Console sink implementation

use crate::core::{format_line, LogEntry, LogLevel, Result, Sink, SinkFilter, TimestampFormat};
use colored::Colorize;

/// Writes entries to stdout, with Error and Critical going to stderr
pub struct ConsoleSink {
    filter: SinkFilter,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleSink {
    pub fn new(filter: SinkFilter) -> Self {
        Self {
            filter,
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use sink_logger::sinks::ConsoleSink;
    /// use sink_logger::{SinkFilter, TimestampFormat};
    ///
    /// let sink = ConsoleSink::new(SinkFilter::default())
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, entry: &LogEntry) -> String {
        let line = format_line(entry, &self.timestamp_format);
        if !self.use_colors {
            return line;
        }

        // Color only the leading level tag
        let tag_len = entry.level().to_str().len() + 2;
        let (tag, rest) = line.split_at(tag_len);
        format!("{}{}", tag.color(entry.level().color_code()), rest)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(SinkFilter::default())
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.render(entry);

        // Route Error and Critical levels to stderr, others to stdout
        match entry.level() {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn filter(&self) -> &SinkFilter {
        &self.filter
    }

    fn filter_mut(&mut self) -> &mut SinkFilter {
        &mut self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CallSite;

    #[test]
    fn test_render_without_colors() {
        let sink = ConsoleSink::default()
            .with_colors(false)
            .with_timestamp_format(TimestampFormat::UnixMillis);
        let entry = LogEntry::new(LogLevel::Debug, CallSite::new("main.rs", "run", 9), "hi");

        let line = sink.render(&entry);
        assert!(line.starts_with("[DEBUG]["));
        assert!(line.ends_with("[main.run Line 9]: hi"));
    }

    #[test]
    fn test_render_with_colors_keeps_text() {
        colored::control::set_override(true);
        let sink = ConsoleSink::default();
        let entry = LogEntry::new(LogLevel::Error, CallSite::new("main.rs", "run", 9), "bad");

        let line = sink.render(&entry);
        assert!(line.contains("[ERROR]"));
        assert!(line.ends_with("[main.run Line 9]: bad"));
    }
}
