//! Score Accumulator - running point totals per user.

use std::sync::Arc;

use tally_core::{TallyError, TallyResult, UserId, ValidationError};
use tally_storage::StorageTrait;

/// Maintains each user's running point total.
///
/// Totals are mutated only through [`add_points`](Self::add_points), which
/// the storage capability performs as an atomic read-modify-write. Points are
/// never withdrawn, so the delta is validated non-negative before any
/// mutation.
#[derive(Clone)]
pub struct ScoreAccumulator {
    storage: Arc<dyn StorageTrait>,
}

impl ScoreAccumulator {
    /// Create an accumulator over the given storage capability.
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self {
        Self { storage }
    }

    /// Add `delta` points to `user_id` and return the new total.
    ///
    /// Fails with `UserNotFound` if the user does not exist and with a
    /// validation error if `delta` is negative.
    pub fn add_points(&self, user_id: UserId, delta: i64) -> TallyResult<i64> {
        if delta < 0 {
            return Err(TallyError::Validation(ValidationError::InvalidValue {
                field: "delta".to_string(),
                reason: "points are never withdrawn".to_string(),
            }));
        }
        self.storage.user_add_points(user_id, delta)
    }
}

// ============================================================================
// TESTS
// ============================================================================
