use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::envelope::ErrorBody;
use crate::utils::truncate_string;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx status. `message` is the server-supplied text.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// Connection refused, DNS failure, timeout, dropped connection.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Used when neither the body nor the status carries a message
const DEFAULT_HTTP_MESSAGE: &str = "API Error";

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
            ApiError::Network(err)
        } else {
            ApiError::Client(err)
        }
    }
}

impl ApiError {
    /// Build an error for a non-2xx response. The message comes from an
    /// envelope-shaped body when there is one, else the status reason.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        debug!(
            status = status.as_u16(),
            body = %truncate_string(body, MAX_ERROR_BODY_LENGTH),
            "Error response"
        );
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::message)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_HTTP_MESSAGE.to_string());
        ApiError::Http { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_envelope_error() {
        let body = r#"{"isSuccess": false, "value": null, "error": "Email already registered"}"#;
        let err = ApiError::from_status(StatusCode::CONFLICT, body);
        assert_eq!(err.to_string(), "Email already registered");
        assert!(matches!(err, ApiError::Http { status: StatusCode::CONFLICT, .. }));
    }

    #[test]
    fn test_from_status_falls_back_to_reason_phrase() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "<html>nope</html>");
        assert_eq!(err.to_string(), "Unauthorized");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn test_from_status_skips_blank_envelope_error() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"error": "", "message": "Account locked"}"#,
        );
        assert_eq!(err.to_string(), "Account locked");

        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"error": "", "value": {"message": "Locked by admin"}}"#,
        );
        assert_eq!(err.to_string(), "Locked by admin");
    }

    #[test]
    fn test_from_status_unknown_code() {
        let status = StatusCode::from_u16(599).expect("valid status");
        let err = ApiError::from_status(status, "{}");
        assert_eq!(err.to_string(), "API Error");
    }
}
