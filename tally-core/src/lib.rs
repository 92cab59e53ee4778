//! Tally Core - Entity Types and Rule Tables
//!
//! Pure data structures for the gamification engine. All other crates depend
//! on this. This crate contains only data types, the fixed rule tables, and
//! the error taxonomy - no orchestration logic.

mod entities;
mod enums;
mod error;
mod rules;

pub use entities::{Action, Badge, BadgeGrant, RankingEntry, User};
pub use enums::{ActionKind, EntityType};
pub use error::{StorageError, TallyError, TallyResult, ValidationError};
pub use rules::{badge_by_id, tariff_for, BadgeRule, BADGE_CATALOG, BADGE_RULES};

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// User identifier. Integer key owned by the external user-record store.
pub type UserId = i64;

/// Badge identifier. Small integer key into the static badge catalog.
pub type BadgeId = i32;

/// Action identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type ActionId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 ActionId (timestamp-sortable).
pub fn new_action_id() -> ActionId {
    Uuid::now_v7()
}

// ============================================================================
// TESTS
// ============================================================================
