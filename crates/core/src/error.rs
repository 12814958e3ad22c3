use crate::types::{DbId, Money};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// An ordering or prerequisite rule rejected the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: Money, required: Money },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
