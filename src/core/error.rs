//! Error types for the log service

pub type Result<T> = std::result::Result<T, LogServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum LogServiceError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sink error with sink name
    #[error("Sink error for '{sink}': {message}")]
    Sink { sink: String, message: String },

    /// The event channel closed while the writer was still expected to run
    #[error("Log event channel closed unexpectedly")]
    ChannelClosed,
}

impl LogServiceError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LogServiceError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LogServiceError::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }
}
