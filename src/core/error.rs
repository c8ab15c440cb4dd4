//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO failure with the operation that caused it
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Write to a file-backed sink failed
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// Another sink already holds the file
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    #[error("Writer error: {0}")]
    WriterError(String),

    /// A sink panicked while writing or flushing
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// The logger was shut down
    #[error("Logger already stopped")]
    LoggerStopped,
}

impl LoggerError {
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_build_matching_variants() {
        assert!(matches!(
            LoggerError::file_lock("/var/log/app.log"),
            LoggerError::FileLockError { .. }
        ));
        assert!(matches!(
            LoggerError::file_sink("/var/log/app.log", "Permission denied"),
            LoggerError::FileSinkError { .. }
        ));
        assert!(matches!(LoggerError::writer("closed"), LoggerError::WriterError(_)));
    }

    #[test]
    fn test_display_messages() {
        let err = LoggerError::sink_panicked("console", "boom");
        assert_eq!(err.to_string(), "Sink 'console' panicked: boom");

        let err = LoggerError::file_lock("/var/log/app.log");
        assert_eq!(
            err.to_string(),
            "Failed to acquire file lock on '/var/log/app.log'"
        );

        assert_eq!(LoggerError::LoggerStopped.to_string(), "Logger already stopped");
    }

    #[test]
    fn test_io_operation_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "/var/log/app.log", io_err);

        assert!(err.to_string().contains("opening log file"));
        assert!(err.source().is_some());
    }
}
