//! Tally Engine - Gamification Orchestrator
//!
//! Composes the action ledger, score accumulator, badge evaluator, and
//! ranking computer over an injected storage capability:
//! - `record_action` appends to the ledger, accrues points, then evaluates
//!   badges (best-effort)
//! - `list_badges` returns the static catalog or a user's badges with grant
//!   dates
//! - `get_ranking` returns the competition-ranked leaderboard

mod badges;
mod ledger;
mod ranking;
mod score;

pub use badges::BadgeEvaluator;
pub use ledger::ActionLedger;
pub use ranking::RankingComputer;
pub use score::ScoreAccumulator;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_core::{
    badge_by_id, tariff_for, Action, ActionKind, Badge, BadgeId, RankingEntry, StorageError,
    TallyError, TallyResult, Timestamp, UserId, ValidationError, BADGE_CATALOG,
};
use tally_storage::StorageTrait;

// ============================================================================
// ENGINE TYPES
// ============================================================================

/// A badge paired with the date the user earned it. `granted_at` is `None`
/// when listing the static catalog without a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeListing {
    pub badge: Badge,
    pub granted_at: Option<Timestamp>,
}

/// Result of a successful `record_action` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// The ledger row appended for this action.
    pub action: Action,
    /// The user's point total after accrual.
    pub new_total: i64,
    /// Badges newly granted by this call's evaluation. Empty when badge
    /// evaluation failed (best-effort) or crossed no threshold.
    pub newly_granted: Vec<BadgeId>,
}

// ============================================================================
// GAMIFICATION ENGINE
// ============================================================================

/// The gamification engine. One instance serves all concurrent request
/// handlers; every component shares the same storage capability.
#[derive(Clone)]
pub struct Engine {
    storage: Arc<dyn StorageTrait>,
    ledger: ActionLedger,
    scores: ScoreAccumulator,
    badges: BadgeEvaluator,
    ranking: RankingComputer,
}

impl Engine {
    /// Create an engine over the given storage capability.
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self {
        Self {
            ledger: ActionLedger::new(Arc::clone(&storage)),
            scores: ScoreAccumulator::new(Arc::clone(&storage)),
            badges: BadgeEvaluator::new(Arc::clone(&storage)),
            ranking: RankingComputer::new(Arc::clone(&storage)),
            storage,
        }
    }

    /// Record a scorable action for `user_id` and accrue its tariff.
    ///
    /// Steps, each depending on the previous succeeding: validate the user
    /// exists, append to the ledger, add points, evaluate badges. A ledger or
    /// accrual failure aborts the call and the action is not recorded. Badge
    /// evaluation is advisory: its failure is logged and swallowed because
    /// the ledger row and points are already durably committed.
    pub fn record_action(&self, user_id: UserId, kind: ActionKind) -> TallyResult<RecordOutcome> {
        if user_id <= 0 {
            return Err(TallyError::Validation(ValidationError::InvalidUserId {
                id: user_id,
            }));
        }
        if self.storage.user_get(user_id)?.is_none() {
            return Err(TallyError::Storage(StorageError::UserNotFound {
                id: user_id,
            }));
        }

        let points = tariff_for(kind);
        let action = self.ledger.append(user_id, kind, points)?;
        let new_total = self.scores.add_points(user_id, points)?;

        let newly_granted = match self.badges.evaluate(user_id) {
            Ok(granted) => granted,
            Err(err) => {
                tracing::warn!(user_id, %kind, error = %err, "badge evaluation failed");
                Vec::new()
            }
        };

        Ok(RecordOutcome {
            action,
            new_total,
            newly_granted,
        })
    }

    /// List a user's badges with grant dates, or the full catalog when no
    /// user is given.
    pub fn list_badges(&self, user_id: Option<UserId>) -> TallyResult<Vec<BadgeListing>> {
        match user_id {
            None => Ok(BADGE_CATALOG
                .iter()
                .map(|badge| BadgeListing {
                    badge: badge.clone(),
                    granted_at: None,
                })
                .collect()),
            Some(user_id) => {
                let grants = self.storage.grant_list_by_user(user_id)?;
                Ok(grants
                    .into_iter()
                    .filter_map(|grant| {
                        badge_by_id(grant.badge_id).map(|badge| BadgeListing {
                            badge: badge.clone(),
                            granted_at: Some(grant.granted_at),
                        })
                    })
                    .collect())
            }
        }
    }

    /// Current leaderboard snapshot.
    pub fn get_ranking(&self) -> TallyResult<Vec<RankingEntry>> {
        self.ranking.compute_ranking()
    }
}

// ============================================================================
// TESTS
// ============================================================================
