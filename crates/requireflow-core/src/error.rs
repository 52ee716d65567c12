//! Centralized error types for RequireFlow.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Requirement not found: {0}")]
    RequirementNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Storage error: {0}")]
    Database(#[from] requireflow_db::DbError),
}

/// Result type for store operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the error addresses an id that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RequirementNotFound(_) | Self::CustomerNotFound(_) | Self::UserNotFound(_)
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::ValidationError(e.to_string())
    }
}
