//! Error Types

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Shown when a failure carries nothing more specific for the user.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Dashboard error types
#[derive(Error, Debug)]
pub enum PulseError {
    /// Required configuration missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or transport failure (connect, TLS, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status, with the backend's message when it sent one
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Caller supplied a value outside a fixed enumeration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Onboarding wizard used out of order
    #[error("Onboarding error: {0}")]
    Onboarding(String),

    /// Token persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PulseError {
    /// Human-readable message supplied by the backend, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message: Some(msg), .. } if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }

    /// Backend message when present, otherwise the generic failure text
    pub fn user_message(&self) -> String {
        self.backend_message()
            .map_or_else(|| GENERIC_FAILURE.to_string(), str::to_string)
    }

    /// Whether the failure happened before any HTTP response arrived
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
