//! Error types for Tally operations

use crate::{BadgeId, EntityType, UserId};
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Append failed for {entity_type:?}: {reason}")]
    AppendFailed {
        entity_type: EntityType,
        reason: String,
    },

    #[error("Update failed for user {id}: {reason}")]
    UpdateFailed { id: UserId, reason: String },

    #[error("Grant failed for user {user_id}, badge {badge_id}: {reason}")]
    GrantFailed {
        user_id: UserId,
        badge_id: BadgeId,
        reason: String,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Validation errors. Rejected before any mutation reaches storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid user id: {id}")]
    InvalidUserId { id: UserId },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Master error type for all Tally operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TallyError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for Tally operations.
pub type TallyResult<T> = Result<T, TallyError>;

// ============================================================================
// TESTS
// ============================================================================
