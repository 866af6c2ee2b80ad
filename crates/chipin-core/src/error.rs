//! Domain errors

use thiserror::Error;
use uuid::Uuid;

use crate::notifier::NotifierError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    #[error("User not found")]
    UserNotFound,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Delivery error: {0}")]
    DeliveryError(#[from] NotifierError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Group or user absent. Both surface the same way to callers.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::GroupNotFound(_) | DomainError::UserNotFound
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
