//! Error types for avia-client

use thiserror::Error;

/// Result type alias using avia-client Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the assistant backend
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reply body could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend returned a non-success status
    #[error("API error: {message} (status {status})")]
    Api { status: u16, message: String },
}

impl Error {
    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let e = Error::api(500, "agent blew up");
        assert_eq!(e.to_string(), "API error: agent blew up (status 500)");
    }

    #[test]
    fn test_json_error_from() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e = Error::from(parse_err);
        assert!(matches!(e, Error::Json(_)));
    }
}
