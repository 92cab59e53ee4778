//! Tally Storage - Storage Trait and In-Memory Implementation
//!
//! Defines the storage capability consumed by the gamification engine. The
//! capability is an explicitly passed object injected into each component -
//! no ambient global connection state. [`MemoryStorage`] is the in-memory
//! implementation used by tests and as the reference semantics for any
//! durable backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tally_core::{
    Action, ActionKind, BadgeGrant, BadgeId, EntityType, StorageError, TallyError, TallyResult,
    User, UserId,
};

// ============================================================================
// STORAGE TRAIT
// ============================================================================

/// Storage capability for Tally entities.
///
/// Implementations provide persistence for users, the append-only action
/// ledger, and badge grants. All methods must be safe to call from concurrent
/// request handlers.
pub trait StorageTrait: Send + Sync {
    // === User Operations ===

    /// Insert a new user.
    fn user_insert(&self, u: &User) -> TallyResult<()>;

    /// Get a user by ID.
    fn user_get(&self, id: UserId) -> TallyResult<Option<User>>;

    /// Atomically add `delta` points to a user's total and return the new
    /// total. Concurrent calls for the same user must never lose an update.
    fn user_add_points(&self, id: UserId, delta: i64) -> TallyResult<i64>;

    /// List all users ordered by points descending (id ascending on ties).
    fn user_list_by_points(&self) -> TallyResult<Vec<User>>;

    // === Action Ledger Operations ===

    /// Durably append an action. Existing rows are never mutated.
    fn action_append(&self, a: &Action) -> TallyResult<()>;

    /// Count all-time actions of `kind` by `user_id`. Must observe an append
    /// performed earlier in the same orchestrated call.
    fn action_count_by_kind(&self, user_id: UserId, kind: ActionKind) -> TallyResult<u64>;

    // === Badge Grant Operations ===

    /// Insert a grant if no grant for `(user_id, badge_id)` exists yet.
    /// Returns `true` if the grant was newly inserted, `false` if it was
    /// already present. Never fails on a duplicate.
    fn grant_insert_if_absent(&self, g: &BadgeGrant) -> TallyResult<bool>;

    /// List all grants held by a user.
    fn grant_list_by_user(&self, user_id: UserId) -> TallyResult<Vec<BadgeGrant>>;

    /// Count grants held by a user.
    fn grant_count_by_user(&self, user_id: UserId) -> TallyResult<u64>;
}

// ============================================================================
// IN-MEMORY STORAGE
// ============================================================================

/// In-memory storage backed by `RwLock`-guarded maps.
///
/// The action ledger is a plain `Vec` so insertion order is preserved, which
/// together with UUIDv7 action ids defines the "Nth action of this kind"
/// ordering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    actions: Arc<RwLock<Vec<Action>>>,
    grants: Arc<RwLock<HashMap<(UserId, BadgeId), BadgeGrant>>>,
}

impl MemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        if let Ok(mut users) = self.users.write() {
            users.clear();
        }
        if let Ok(mut actions) = self.actions.write() {
            actions.clear();
        }
        if let Ok(mut grants) = self.grants.write() {
            grants.clear();
        }
    }

    /// Count of stored users.
    pub fn user_count(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    /// Count of ledger rows across all users.
    pub fn action_count(&self) -> usize {
        self.actions.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Count of grants across all users.
    pub fn grant_count(&self) -> usize {
        self.grants.read().map(|g| g.len()).unwrap_or(0)
    }
}

impl StorageTrait for MemoryStorage {
    // === User Operations ===

    fn user_insert(&self, u: &User) -> TallyResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        if users.contains_key(&u.id) {
            return Err(TallyError::Storage(StorageError::AppendFailed {
                entity_type: EntityType::User,
                reason: format!("user {} already exists", u.id),
            }));
        }
        users.insert(u.id, u.clone());
        Ok(())
    }

    fn user_get(&self, id: UserId) -> TallyResult<Option<User>> {
        let users = self.users.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(users.get(&id).cloned())
    }

    fn user_add_points(&self, id: UserId, delta: i64) -> TallyResult<i64> {
        // Single write-lock critical section: the read-modify-write cannot
        // interleave with another increment for any user.
        let mut users = self
            .users
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        let user = users
            .get_mut(&id)
            .ok_or(TallyError::Storage(StorageError::UserNotFound { id }))?;
        user.points += delta;
        Ok(user.points)
    }

    fn user_list_by_points(&self) -> TallyResult<Vec<User>> {
        let users = self.users.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| b.points.cmp(&a.points).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    // === Action Ledger Operations ===

    fn action_append(&self, a: &Action) -> TallyResult<()> {
        let mut actions = self
            .actions
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        actions.push(a.clone());
        Ok(())
    }

    fn action_count_by_kind(&self, user_id: UserId, kind: ActionKind) -> TallyResult<u64> {
        let actions = self
            .actions
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(actions
            .iter()
            .filter(|a| a.user_id == user_id && a.kind == kind)
            .count() as u64)
    }

    // === Badge Grant Operations ===

    fn grant_insert_if_absent(&self, g: &BadgeGrant) -> TallyResult<bool> {
        let mut grants = self
            .grants
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        let key = (g.user_id, g.badge_id);
        if grants.contains_key(&key) {
            return Ok(false);
        }
        grants.insert(key, g.clone());
        Ok(true)
    }

    fn grant_list_by_user(&self, user_id: UserId) -> TallyResult<Vec<BadgeGrant>> {
        let grants = self.grants.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut result: Vec<BadgeGrant> = grants
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|g| g.badge_id);
        Ok(result)
    }

    fn grant_count_by_user(&self, user_id: UserId) -> TallyResult<u64> {
        let grants = self.grants.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(grants.values().filter(|g| g.user_id == user_id).count() as u64)
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
