//! Error taxonomy for backend calls.
//!
//! # Design
//! - Keep backend rejections, transport failures and decode failures distinct.
//! - Resolve the text shown to users in one place: backend message first, then
//!   the transport error's own message, then a generic fallback.

use thiserror::Error;

/// Message shown when neither the backend nor the transport said anything useful.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The configured base URL is unusable.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The backend answered with a non-success status.
    #[error("request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, when present and parseable.
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// A success response carried an unexpected body.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// A protected call was attempted without an access token.
    #[error("an access token is required for this request")]
    Unauthenticated,
}

impl ApiError {
    /// Text suitable for a toast description.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Transport(message) if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Title already exists".into()),
        };
        assert_eq!(err.user_message(), "Title already exists");
    }

    #[test]
    fn transport_message_is_second_choice() {
        let err = ApiError::Transport("error sending request".into());
        assert_eq!(err.user_message(), "error sending request");
    }

    #[test]
    fn everything_else_falls_back_to_generic() {
        for err in [
            ApiError::Status {
                status: 500,
                message: None,
            },
            ApiError::Transport("  ".into()),
            ApiError::Decode("expected value".into()),
            ApiError::Unauthenticated,
        ] {
            assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        }
    }
}
