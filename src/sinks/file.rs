//! Text file sink implementation

use crate::core::{format_line, LogEntry, LoggerError, Result, Sink, SinkFilter, TimestampFormat};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per entry to a file and flushes after every write.
///
/// The file is locked exclusively (advisory lock) while the sink exists, so
/// two sinks cannot interleave writes to the same file.
pub struct TextFileSink {
    filter: SinkFilter,
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    timestamp_format: TimestampFormat,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>, filter: SinkFilter) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;

        file.try_lock_exclusive()
            .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;

        Ok(Self {
            filter,
            path,
            writer: Some(BufWriter::new(file)),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sink_logger::sinks::TextFileSink;
    /// use sink_logger::{SinkFilter, TimestampFormat};
    ///
    /// let sink = TextFileSink::new("/var/log/app.log", SinkFilter::default())
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for TextFileSink {
    fn write(&mut self, entry: &LogEntry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = format_line(entry, &self.timestamp_format);
        output.push('\n');

        writer
            .write_all(output.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::file_sink(self.path.display().to_string(), e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "text_file"
    }

    fn filter(&self) -> &SinkFilter {
        &self.filter
    }

    fn filter_mut(&mut self) -> &mut SinkFilter {
        &mut self.filter
    }
}

impl Drop for TextFileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
        if let Some(writer) = self.writer.take() {
            if let Ok(file) = writer.into_inner() {
                let _ = FileExt::unlock(&file);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogLevel};
    use tempfile::TempDir;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(LogLevel::Error, CallSite::new("src/io.rs", "io::read", 5), message)
    }

    #[test]
    fn test_appends_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = temp_dir.path().join("app.log");

        let mut sink = TextFileSink::new(&log_file, SinkFilter::default()).expect("open sink");
        sink.write(&entry("first")).unwrap();
        sink.write(&entry("second\nline")).unwrap();

        let content = std::fs::read_to_string(&log_file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[io.read Line 5]: first"));
        assert!(lines[1].ends_with(": second\\nline"));
    }

    #[test]
    fn test_second_sink_on_same_file_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = temp_dir.path().join("locked.log");

        let first = TextFileSink::new(&log_file, SinkFilter::default()).expect("open sink");
        let second = TextFileSink::new(&log_file, SinkFilter::default());
        assert!(matches!(second, Err(LoggerError::FileLockError { .. })));

        drop(first);
        assert!(TextFileSink::new(&log_file, SinkFilter::default()).is_ok());
    }

    #[test]
    fn test_missing_directory_reports_context() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_file = temp_dir.path().join("missing").join("app.log");

        let result = TextFileSink::new(&log_file, SinkFilter::default());
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
    }
}
