//! Badge Evaluator - grants badges when cumulative-action thresholds are met.

use std::sync::Arc;

use chrono::Utc;
use tally_core::{ActionKind, BadgeGrant, BadgeId, TallyResult, UserId, BADGE_RULES};
use tally_storage::StorageTrait;

use crate::ledger::ActionLedger;

/// Evaluates the declarative badge rule table against a user's action counts
/// and performs idempotent grant inserts.
///
/// Rules are independent predicates over disjoint counts, so evaluation order
/// across badges does not matter. Re-evaluating never duplicates a grant.
#[derive(Clone)]
pub struct BadgeEvaluator {
    ledger: ActionLedger,
    storage: Arc<dyn StorageTrait>,
}

impl BadgeEvaluator {
    /// Create an evaluator over the given storage capability.
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self {
        Self {
            ledger: ActionLedger::new(Arc::clone(&storage)),
            storage,
        }
    }

    /// Grant every badge whose rule evaluates true for `user_id`.
    ///
    /// Returns the ids of badges newly granted by this evaluation. Already
    /// held badges are absorbed silently by the insert-if-absent grant.
    pub fn evaluate(&self, user_id: UserId) -> TallyResult<Vec<BadgeId>> {
        let mut newly_granted = Vec::new();
        // One ledger count per kind, shared across the rules for that kind.
        let mut counts: [Option<u64>; 3] = [None; 3];

        for rule in BADGE_RULES {
            let slot = match rule.kind {
                ActionKind::CreateItem => 0,
                ActionKind::EditItem => 1,
                ActionKind::DeleteItem => 2,
            };
            let count = match counts[slot] {
                Some(c) => c,
                None => {
                    let c = self.ledger.count_by_kind(user_id, rule.kind)?;
                    counts[slot] = Some(c);
                    c
                }
            };

            if count >= rule.threshold {
                let grant = BadgeGrant {
                    user_id,
                    badge_id: rule.badge_id,
                    granted_at: Utc::now(),
                };
                if self.storage.grant_insert_if_absent(&grant)? {
                    tracing::debug!(user_id, badge_id = rule.badge_id, "badge granted");
                    newly_granted.push(rule.badge_id);
                }
            }
        }

        Ok(newly_granted)
    }
}

// ============================================================================
// TESTS
// ============================================================================
