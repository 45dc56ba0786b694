//! Repositories sitting between the API client and UI state.
//!
//! Every call collapses to a `SessionResult`: the decoded envelope on
//! success, or a `SessionError` whose `Display` is the message to show the
//! user. The error kind is kept so callers can branch on it if they need to.

pub mod auth;
pub mod user;

use thiserror::Error;

use crate::api::ApiError;

pub use auth::AuthRepository;
pub use user::UserRepository;

/// Message shown for any connectivity failure
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error. Please check your connection.";

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The server processed the request and rejected it in the envelope.
    #[error("{0}")]
    Business(String),

    /// Non-2xx HTTP status.
    #[error("{message}")]
    Transport { status: u16, message: String },

    /// No connection or timeout.
    #[error("{0}")]
    Network(String),

    /// Malformed payload or anything else unexpected.
    #[error("{0}")]
    Unknown(String),
}

impl SessionError {
    pub fn message(&self) -> &str {
        match self {
            SessionError::Business(message)
            | SessionError::Network(message)
            | SessionError::Unknown(message) => message,
            SessionError::Transport { message, .. } => message,
        }
    }

    /// The server refused the stored token (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SessionError::Transport { status: 401, .. })
    }
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, message } => SessionError::Transport {
                status: status.as_u16(),
                message,
            },
            ApiError::Network(_) => SessionError::Network(NETWORK_ERROR_MESSAGE.to_string()),
            other => SessionError::Unknown(other.to_string()),
        }
    }
}
