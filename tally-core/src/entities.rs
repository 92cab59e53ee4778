//! Core entity structures

use crate::{ActionId, ActionKind, BadgeId, Timestamp, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A user of the shared inventory.
///
/// Identity and display name are owned by the external user-record store;
/// the engine only ever mutates `points`, and only upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Cumulative point total. Always equals the sum of `points_awarded`
    /// over this user's actions.
    pub points: i64,
    pub created_at: Timestamp,
}

impl User {
    /// Create a new user with zero points.
    pub fn new(id: UserId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            points: 0,
            created_at: Utc::now(),
        }
    }
}

/// An immutable record of a user performing a scorable operation.
///
/// Append-only: never updated or deleted. Ordering by `occurred_at` (and
/// insertion order on ties) defines "Nth action of this kind by this user".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: ActionId,
    pub user_id: UserId,
    pub kind: ActionKind,
    pub points_awarded: i64,
    pub occurred_at: Timestamp,
}

impl Action {
    /// Create a new action record stamped with the current time.
    pub fn new(user_id: UserId, kind: ActionKind, points_awarded: i64) -> Self {
        Self {
            action_id: crate::new_action_id(),
            user_id,
            kind,
            points_awarded,
            occurred_at: Utc::now(),
        }
    }
}

/// Static badge catalog entry. Reference data, not engine-owned.
/// Serialize-only: the catalog is compiled in, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// A badge held by a user.
///
/// At most one grant per `(user_id, badge_id)` pair ever exists. Grants are
/// never revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeGrant {
    pub user_id: UserId,
    pub badge_id: BadgeId,
    pub granted_at: Timestamp,
}

/// One row of the leaderboard. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub user_id: UserId,
    pub name: String,
    pub points: i64,
    pub badge_count: u64,
    /// Standard competition rank: tied scores share a position and the next
    /// distinct score's position is 1 + the count of users strictly ahead.
    pub position: u64,
}

// ============================================================================
// TESTS
// ============================================================================
