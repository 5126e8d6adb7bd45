//! Error Types
//!
//! One enum per failure family. None of these are fatal: callers log them and
//! surface a message.

use thiserror::Error;

/// Failure talking to the REST API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` comes from the body when it has one
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("You need to log in first")]
    Unauthenticated,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::Status { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Rejected cart mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    #[error("Campaign id is required")]
    MissingCampaign,

    #[error("Donation amount must be a positive number, got {0}")]
    InvalidAmount(String),

    /// The reactive store was disposed
    #[error("Cart is not available")]
    Unavailable,
}

/// Durable storage failure
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Local storage is unavailable")]
    Unavailable,

    #[error("Storage write failed: {0}")]
    Write(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::Unauthenticated.is_unauthorized());
        assert!(ApiError::Status { status: 401, message: "expired".into() }.is_unauthorized());
        assert!(!ApiError::Status { status: 500, message: "boom".into() }.is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }

    #[test]
    fn test_status_error_displays_message() {
        let err = ApiError::Status { status: 400, message: "Email already registered".into() };
        assert_eq!(err.to_string(), "Email already registered");
    }
}
