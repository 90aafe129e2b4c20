/// Error responses for the deck API
///
/// This module provides:
/// - The JSON error body shared by every endpoint
/// - Status code and machine-readable code mapping per error
/// - Severity-based error logging
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Standard error response format for all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "deck_not_found")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad input from the caller (4xx)
    Client,
    /// Unexpected failure (5xx)
    Server,
    /// Broken invariant in configuration or shared state
    Critical,
}

/// Conversion of an error into an HTTP response, logged by severity.
pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self.error_details() {
            Some(details) => {
                ErrorResponse::with_details(self.error_code(), self.error_message(), details)
            }
            None => ErrorResponse::new(self.error_code(), self.error_message()),
        }
    }

    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let error_response = self.to_error_response();
        log_error(self.severity(), status, &error_response);
        error_response.into_response(status)
    }
}

fn log_error(severity: ErrorSeverity, status: StatusCode, error: &ErrorResponse) {
    match severity {
        ErrorSeverity::Client => tracing::warn!(
            status = status.as_u16(),
            error = %error.error,
            "client error: {}",
            error.message
        ),
        ErrorSeverity::Server => tracing::error!(
            status = status.as_u16(),
            error = %error.error,
            "server error: {}",
            error.message
        ),
        ErrorSeverity::Critical => tracing::error!(
            status = status.as_u16(),
            error = %error.error,
            critical = true,
            "critical error: {}",
            error.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serialization() {
        let error = ErrorResponse::new("deck_not_found", "Deck not found: abc");
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "deck_not_found");
        assert_eq!(json["message"], "Deck not found: abc");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn error_response_with_details() {
        let error = ErrorResponse::with_details(
            "unknown_card_code",
            "Unknown card",
            json!({ "code": "X" }),
        );
        let json = serde_json::to_value(&error).expect("serialize");

        assert_eq!(json["error"], "unknown_card_code");
        assert_eq!(json["details"]["code"], "X");
    }

    #[test]
    fn error_response_display() {
        let error = ErrorResponse::new("deck_not_found", "Deck not found");
        assert_eq!(error.to_string(), "deck_not_found: Deck not found");
    }
}
