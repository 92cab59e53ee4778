//! Fixed domain rules: the point tariff and the badge rule table.
//!
//! Thresholds are domain constants, not runtime configuration. Adding a badge
//! means adding a row to [`BADGE_RULES`] and [`BADGE_CATALOG`]; the evaluator
//! iterates the table and needs no new control flow.

use crate::{ActionKind, Badge, BadgeId};

// ============================================================================
// POINT TARIFF
// ============================================================================

/// Points awarded per action kind.
pub fn tariff_for(kind: ActionKind) -> i64 {
    match kind {
        ActionKind::CreateItem => 10,
        ActionKind::EditItem => 5,
        ActionKind::DeleteItem => 2,
    }
}

// ============================================================================
// BADGE RULES
// ============================================================================

/// A single unlock rule: holding `badge_id` requires at least `threshold`
/// all-time actions of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    pub badge_id: BadgeId,
    pub kind: ActionKind,
    pub threshold: u64,
}

/// The complete unlock rule table. Rules are independent predicates; a user
/// can cross several thresholds in one evaluation.
pub const BADGE_RULES: [BadgeRule; 5] = [
    BadgeRule {
        badge_id: 1,
        kind: ActionKind::CreateItem,
        threshold: 1,
    },
    BadgeRule {
        badge_id: 2,
        kind: ActionKind::CreateItem,
        threshold: 10,
    },
    BadgeRule {
        badge_id: 3,
        kind: ActionKind::CreateItem,
        threshold: 50,
    },
    BadgeRule {
        badge_id: 4,
        kind: ActionKind::EditItem,
        threshold: 5,
    },
    BadgeRule {
        badge_id: 5,
        kind: ActionKind::DeleteItem,
        threshold: 10,
    },
];

// ============================================================================
// BADGE CATALOG
// ============================================================================

/// Static badge reference data, read-only to the engine.
pub const BADGE_CATALOG: [Badge; 5] = [
    Badge {
        id: 1,
        name: "First Item",
        description: "Created your first inventory item",
        icon: "🌱",
    },
    Badge {
        id: 2,
        name: "Organizer",
        description: "Created 10 inventory items",
        icon: "📦",
    },
    Badge {
        id: 3,
        name: "Inventory Master",
        description: "Created 50 inventory items",
        icon: "🏆",
    },
    Badge {
        id: 4,
        name: "Editor",
        description: "Edited 5 inventory items",
        icon: "✏️",
    },
    Badge {
        id: 5,
        name: "Cleaner",
        description: "Deleted 10 inventory items",
        icon: "🧹",
    },
];

/// Look up a catalog entry by id.
pub fn badge_by_id(id: BadgeId) -> Option<&'static Badge> {
    BADGE_CATALOG.iter().find(|b| b.id == id)
}

// ============================================================================
// TESTS
// ============================================================================
