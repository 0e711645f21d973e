/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the Storyloom API. Every
 * handler validates inputs and entity existence before mutating state and
 * surfaces failures as one of these kinds, which map onto HTTP statuses
 * in `conversion.rs`.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// API error taxonomy
///
/// Each variant carries a human-readable message suitable for clients.
/// Storage errors keep their source for logging but render as a generic
/// internal error so implementation detail never leaks.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range input
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Referenced entity absent
    #[error("{entity} not found")]
    NotFound {
        /// The kind of entity that was looked up
        entity: &'static str,
    },

    /// Actor lacks the required role or ownership
    #[error("{message}")]
    Permission {
        /// Human-readable error message
        message: String,
    },

    /// Operation not allowed given the entity's current state
    #[error("{message}")]
    InvalidState {
        /// Human-readable error message
        message: String,
    },

    /// Contributor limit reached
    #[error("{message}")]
    Capacity {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Database not configured
    #[error("Database not configured")]
    Unavailable,

    /// Storage failure; the source is logged, clients see a generic message
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Serialization failure
    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    /// Any other internal failure
    #[error("{message}")]
    Internal {
        /// Message for the server log; clients see a generic error
        message: String,
    },
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for an entity kind
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Create a permission error
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a capacity error
    pub fn capacity(message: impl Into<String>) -> Self {
        Self::Capacity {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Permission { .. } => StatusCode::FORBIDDEN,
            Self::InvalidState { .. } => StatusCode::BAD_REQUEST,
            Self::Capacity { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Serialization(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to clients.
    ///
    /// Internal failures render a generic message; the detail goes to the
    /// log in `conversion.rs`.
    pub fn client_message(&self) -> String {
        match self {
            Self::Database(_) => "Server error".to_string(),
            Self::Serialization(_) => "Server error".to_string(),
            Self::Internal { .. } => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { .. } => Self::Validation {
                message: err.to_string(),
            },
            SharedError::SerializationError { message } => Self::Internal { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("Story").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::permission("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::invalid_state("story closed").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::capacity("full").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("Contribution");
        assert_eq!(err.to_string(), "Contribution not found");
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = ApiError::internal("connection refused at 10.0.0.3:5432");
        assert_eq!(err.client_message(), "Server error");
    }

    #[test]
    fn test_from_shared_validation() {
        let shared = SharedError::validation("content", "Content must be between 10 and 5000 characters");
        let api: ApiError = shared.into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert!(api.client_message().contains("content"));
    }
}
