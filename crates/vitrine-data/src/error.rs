//! External call error types.

use thiserror::Error;

/// Errors that can occur when calling an external collaborator.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Failed to reach the collaborator.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The collaborator rejected the call.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The call timed out.
    #[error("Request timed out")]
    Timeout,

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::ParseError(e.to_string())
    }
}

impl ApiError {
    /// Check if a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::RequestError(_) | ApiError::Timeout => true,
            ApiError::HttpError { status, .. } => *status >= 500,
            ApiError::ParseError(_) | ApiError::NotFound(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Timeout.is_transient());
        assert!(ApiError::RequestError("connection reset".into()).is_transient());
        assert!(ApiError::HttpError {
            status: 503,
            message: "unavailable".into()
        }
        .is_transient());
        assert!(!ApiError::HttpError {
            status: 422,
            message: "rejected".into()
        }
        .is_transient());
        assert!(!ApiError::NotFound("customer".into()).is_transient());
    }
}
