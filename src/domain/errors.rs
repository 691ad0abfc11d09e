//! Domain error types
//!
//! This module defines the error hierarchy for the collector. Upstream failures
//! are carried as a closed set of variants so the pagination policy can match
//! on the kind instead of on message text.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the crate.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum DjenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed query parameters or date ranges, rejected before any request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream API errors
    #[error("DJEN API error: {0}")]
    Fetch(#[from] FetchError),

    /// Spreadsheet generation errors
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors produced while fetching one page from the notifications API
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 500, worth retrying the same page
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// HTTP 502/503, the service is down or overloaded
    #[error("Service unavailable: {status}")]
    ServerUnavailable { status: u16 },

    /// The server could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// HTTP 4xx
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The body is not an object with an `items` array
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Any other non-success status
    #[error("Unexpected server response: {status} - {message}")]
    UnknownServerError { status: u16, message: String },
}

/// Closed classification of [`FetchError`] used by the pagination policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    ServerError,
    ServerUnavailable,
    Network,
    Timeout,
    ClientError,
    InvalidResponse,
    UnknownServerError,
}

impl FetchError {
    /// Returns the classification of this error
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::ServerError { .. } => FetchErrorKind::ServerError,
            FetchError::ServerUnavailable { .. } => FetchErrorKind::ServerUnavailable,
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Timeout(_) => FetchErrorKind::Timeout,
            FetchError::ClientError { .. } => FetchErrorKind::ClientError,
            FetchError::InvalidResponse(_) => FetchErrorKind::InvalidResponse,
            FetchError::UnknownServerError { .. } => FetchErrorKind::UnknownServerError,
        }
    }
}

/// A user-facing explanation of a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub title: &'static str,
    pub message: &'static str,
}

impl FetchErrorKind {
    /// Maps the kind to the message shown to the person running the search
    pub fn user_message(self) -> UserMessage {
        match self {
            FetchErrorKind::ServerError => UserMessage {
                title: "CNJ system temporarily unavailable",
                message: "The CNJ system is having technical problems right now. \
                          Try again in a few minutes.",
            },
            FetchErrorKind::ServerUnavailable => UserMessage {
                title: "Service temporarily down",
                message: "The CNJ system is under maintenance or overloaded. \
                          Wait a few minutes and try again.",
            },
            FetchErrorKind::Network => UserMessage {
                title: "Connection problem",
                message: "Check your internet connection and try again. If the problem \
                          persists the CNJ system may be unstable.",
            },
            FetchErrorKind::Timeout => UserMessage {
                title: "Time limit exceeded",
                message: "The query is taking longer than expected. Try again with a \
                          shorter date range.",
            },
            FetchErrorKind::ClientError
            | FetchErrorKind::InvalidResponse
            | FetchErrorKind::UnknownServerError => UserMessage {
                title: "Unexpected error",
                message: "An unexpected problem occurred while querying the CNJ system. \
                          Try again in a few minutes.",
            },
        }
    }
}

impl DjenError {
    /// User-facing message for this error
    pub fn user_message(&self) -> UserMessage {
        match self {
            DjenError::Fetch(e) => e.kind().user_message(),
            DjenError::Validation(_) => UserMessage {
                title: "Invalid search",
                message: "Fill in a party name, an OAB number with its state, or a text \
                          filter, and check the dates.",
            },
            DjenError::Export(_) | DjenError::Io(_) => UserMessage {
                title: "Could not generate the spreadsheet",
                message: "The notifications were collected but the file could not be written.",
            },
            _ => FetchErrorKind::UnknownServerError.user_message(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for DjenError {
    fn from(err: std::io::Error) -> Self {
        DjenError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DjenError {
    fn from(err: serde_json::Error) -> Self {
        DjenError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DjenError {
    fn from(err: toml::de::Error) -> Self {
        DjenError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rust_xlsxwriter::XlsxError> for DjenError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DjenError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djen_error_display() {
        let err = DjenError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_fetch_error_conversion() {
        let fetch_err = FetchError::Network("connection refused".to_string());
        let err: DjenError = fetch_err.into();
        assert!(matches!(err, DjenError::Fetch(FetchError::Network(_))));
    }

    #[test]
    fn test_fetch_error_kind() {
        let err = FetchError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.kind(), FetchErrorKind::ServerError);
        assert_eq!(
            FetchError::ServerUnavailable { status: 503 }.kind(),
            FetchErrorKind::ServerUnavailable
        );
        assert_eq!(
            FetchError::InvalidResponse("no items".to_string()).kind(),
            FetchErrorKind::InvalidResponse
        );
    }

    #[test]
    fn test_user_message_for_timeout() {
        let err: DjenError = FetchError::Timeout("30s".to_string()).into();
        assert_eq!(err.user_message().title, "Time limit exceeded");
    }

    #[test]
    fn test_user_message_falls_back_to_unexpected() {
        let msg = FetchErrorKind::ClientError.user_message();
        assert_eq!(msg.title, "Unexpected error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: DjenError = io_err.into();
        assert!(matches!(err, DjenError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: DjenError = json_err.into();
        assert!(matches!(err, DjenError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: DjenError = toml_err.into();
        assert!(matches!(err, DjenError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_djen_error_implements_std_error() {
        let err = DjenError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
