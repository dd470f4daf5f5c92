//! Remote API error types.

use thiserror::Error;

/// Failure modes of a remote API call.
///
/// Every variant is terminal for the action that issued the call: there are
/// no retries, and the message ends up verbatim in the UI status banner.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a non-2xx status error carrying the response body text.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code, if this is a status failure.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_contains_code_and_body() {
        let err = ApiError::status(500, "boom");
        let message = err.to_string();

        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_status_code_accessor() {
        assert_eq!(ApiError::status(404, "").status_code(), Some(404));
        assert_eq!(ApiError::network("down").status_code(), None);
    }
}
