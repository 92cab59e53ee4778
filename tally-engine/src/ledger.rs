//! Action Ledger - append-only log of scorable actions.

use std::sync::Arc;

use tally_core::{Action, ActionKind, TallyResult, UserId};
use tally_storage::StorageTrait;

/// Facade over the ledger portion of the storage capability.
///
/// Appends are durable and never mutate existing rows. Counts observe an
/// append performed earlier in the same orchestrated call.
#[derive(Clone)]
pub struct ActionLedger {
    storage: Arc<dyn StorageTrait>,
}

impl ActionLedger {
    /// Create a ledger over the given storage capability.
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self {
        Self { storage }
    }

    /// Append a new action for `user_id` and return the stored record.
    pub fn append(&self, user_id: UserId, kind: ActionKind, points: i64) -> TallyResult<Action> {
        let action = Action::new(user_id, kind, points);
        self.storage.action_append(&action)?;
        Ok(action)
    }

    /// All-time count of `kind` actions by `user_id`.
    pub fn count_by_kind(&self, user_id: UserId, kind: ActionKind) -> TallyResult<u64> {
        self.storage.action_count_by_kind(user_id, kind)
    }
}

// ============================================================================
// TESTS
// ============================================================================
