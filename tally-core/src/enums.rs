//! Enum types for Tally entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE ENUMS
// ============================================================================

/// The closed set of scorable action kinds.
///
/// A closed enumeration rather than a free-form string, so the tariff table
/// and badge rules are exhaustively checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// An inventory item was created.
    CreateItem,
    /// An inventory item was edited.
    EditItem,
    /// An inventory item was deleted.
    DeleteItem,
}

impl ActionKind {
    /// All kinds, in tariff-table order.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::CreateItem,
        ActionKind::EditItem,
        ActionKind::DeleteItem,
    ];

    /// Wire/storage name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CreateItem => "create_item",
            ActionKind::EditItem => "edit_item",
            ActionKind::DeleteItem => "delete_item",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_item" => Ok(ActionKind::CreateItem),
            "edit_item" => Ok(ActionKind::EditItem),
            "delete_item" => Ok(ActionKind::DeleteItem),
            other => Err(format!("unknown action kind: {other}")),
        }
    }
}

/// Entity type discriminator for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    User,
    Action,
    Badge,
    BadgeGrant,
}

// ============================================================================
// TESTS
// ============================================================================
