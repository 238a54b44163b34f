use std::fmt;

/// Transport-level failures raised by an [`HttpBackend`](super::HttpBackend)
///
/// These never describe HTTP status codes: a response with any status is a
/// successful exchange as far as the transport is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Network-related errors (connection failed, TLS, timeout, etc.)
    Network(String),
    /// The response body could not be read
    Body(String),
    /// The HTTP client itself could not be constructed
    Client(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Network(msg) => write!(f, "Network error: {msg}"),
            HttpError::Body(msg) => write!(f, "Failed to read response body: {msg}"),
            HttpError::Client(msg) => write!(f, "Failed to initialise HTTP client: {msg}"),
        }
    }
}

impl std::error::Error for HttpError {}
