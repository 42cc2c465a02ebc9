// error.rs — Error types for notification dispatch.

use thiserror::Error;

/// Errors a notification sink can raise. These are always swallowed by the
/// dispatcher after logging — they exist so sinks can say *what* went wrong.
#[derive(Debug, Error)]
pub enum EventError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize an event.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A delivery channel rejected the event.
    #[error("sink failure: {0}")]
    Sink(String),
}
