use std::fmt;

use crate::http::HttpError;

/// Central error type for figma-tool
///
/// Every failure surfaced to the user is one of these kinds. Internal
/// components propagate the most specific kind they have; only the CLI
/// boundary turns them into an `Error:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum FigmaError {
    /// Missing or unusable configuration (token, HTTP client setup)
    Configuration(String),
    /// A required identifier or export parameter was not supplied
    MissingParameter(String),
    /// Connection, TLS or timeout failure at the network layer
    Transport(String),
    /// The service answered with a failure status or an error payload
    Remote { status: u16, body: String },
    /// The response body is not valid JSON
    Decode(String),
}

impl fmt::Display for FigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FigmaError::Configuration(msg) => write!(f, "{msg}"),
            FigmaError::MissingParameter(name) => {
                write!(f, "Missing required parameter: {name}")
            }
            FigmaError::Transport(msg) => write!(f, "Transport error: {msg}"),
            FigmaError::Remote { status, body } => {
                // Keep the user-visible message on a single line.
                let body = body.trim().replace(['\r', '\n'], " ");
                write!(f, "Remote error (HTTP {status}): {body}")
            }
            FigmaError::Decode(msg) => write!(f, "Invalid JSON in response: {msg}"),
        }
    }
}

impl std::error::Error for FigmaError {}

impl From<HttpError> for FigmaError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Network(msg) | HttpError::Body(msg) => FigmaError::Transport(msg),
            HttpError::Client(msg) => FigmaError::Configuration(msg),
        }
    }
}

impl From<serde_json::Error> for FigmaError {
    fn from(err: serde_json::Error) -> Self {
        FigmaError::Decode(err.to_string())
    }
}

impl FigmaError {
    /// Short, stable name of the error kind (used in log records)
    pub fn kind(&self) -> &'static str {
        match self {
            FigmaError::Configuration(_) => "configuration",
            FigmaError::MissingParameter(_) => "missing-parameter",
            FigmaError::Transport(_) => "transport",
            FigmaError::Remote { .. } => "remote",
            FigmaError::Decode(_) => "decode",
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Helper function to create a missing parameter error
pub fn missing_parameter(name: &str) -> FigmaError {
    FigmaError::MissingParameter(name.to_string())
}
