//! Ranking Computer - derives the leaderboard from scores and badge counts.

use std::sync::Arc;

use tally_core::{RankingEntry, TallyResult};
use tally_storage::StorageTrait;

/// Computes the leaderboard snapshot on demand.
///
/// A pure read: takes no lock across storage calls, so it may observe a
/// partially-applied concurrent `record_action`. Acceptable staleness.
#[derive(Clone)]
pub struct RankingComputer {
    storage: Arc<dyn StorageTrait>,
}

impl RankingComputer {
    /// Create a ranking computer over the given storage capability.
    pub fn new(storage: Arc<dyn StorageTrait>) -> Self {
        Self { storage }
    }

    /// Full leaderboard, ordered by points descending.
    ///
    /// Positions use standard competition ranking: tied scores share a
    /// position and the next distinct score's position is 1 + the count of
    /// users strictly ahead. Users with zero actions appear with 0 points.
    pub fn compute_ranking(&self) -> TallyResult<Vec<RankingEntry>> {
        let users = self.storage.user_list_by_points()?;

        let mut entries = Vec::with_capacity(users.len());
        let mut position = 0u64;
        let mut prev_points: Option<i64> = None;

        for (index, user) in users.into_iter().enumerate() {
            if prev_points != Some(user.points) {
                position = index as u64 + 1;
                prev_points = Some(user.points);
            }
            let badge_count = self.storage.grant_count_by_user(user.id)?;
            entries.push(RankingEntry {
                user_id: user.id,
                name: user.name,
                points: user.points,
                badge_count,
                position,
            });
        }

        Ok(entries)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tally_core::{BadgeGrant, User};
    use tally_storage::MemoryStorage;

    fn setup(points: &[(i64, i64)]) -> RankingComputer {
        let storage = Arc::new(MemoryStorage::new());
        for (id, pts) in points {
            storage.user_insert(&User::new(*id, &format!("user{id}"))).unwrap();
            if *pts > 0 {
                storage.user_add_points(*id, *pts).unwrap();
            }
        }
        RankingComputer::new(storage)
    }

    #[test]
    fn test_ties_share_position_and_next_skips() {
        let ranking = setup(&[(1, 30), (2, 30), (3, 10)]);

        let entries = ranking.compute_ranking().unwrap();
        let positions: Vec<u64> = entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 1, 3]);
    }

    #[test]
    fn test_distinct_scores_rank_consecutively() {
        let ranking = setup(&[(1, 50), (2, 30), (3, 10)]);

        let entries = ranking.compute_ranking().unwrap();
        let positions: Vec<u64> = entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_action_users_appear_with_zero_points() {
        let ranking = setup(&[(1, 20), (2, 0)]);

        let entries = ranking.compute_ranking().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].user_id, 2);
        assert_eq!(entries[1].points, 0);
        assert_eq!(entries[1].position, 2);
    }

    #[test]
    fn test_all_tied_all_first() {
        let ranking = setup(&[(1, 10), (2, 10), (3, 10)]);

        let entries = ranking.compute_ranking().unwrap();
        assert!(entries.iter().all(|e| e.position == 1));
    }

    #[test]
    fn test_badge_counts_joined() {
        let storage = Arc::new(MemoryStorage::new());
        storage.user_insert(&User::new(1, "alice")).unwrap();
        storage.user_insert(&User::new(2, "bob")).unwrap();
        for badge_id in [1, 2, 4] {
            storage
                .grant_insert_if_absent(&BadgeGrant {
                    user_id: 1,
                    badge_id,
                    granted_at: Utc::now(),
                })
                .unwrap();
        }
        let ranking = RankingComputer::new(Arc::clone(&storage) as Arc<dyn StorageTrait>);

        let entries = ranking.compute_ranking().unwrap();
        let alice = entries.iter().find(|e| e.user_id == 1).unwrap();
        let bob = entries.iter().find(|e| e.user_id == 2).unwrap();
        assert_eq!(alice.badge_count, 3);
        assert_eq!(bob.badge_count, 0);
    }

    #[test]
    fn test_empty_storage_empty_leaderboard() {
        let ranking = RankingComputer::new(Arc::new(MemoryStorage::new()));
        assert!(ranking.compute_ranking().unwrap().is_empty());
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use tally_core::User;
    use tally_storage::MemoryStorage;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Competition ranking invariants: entries are sorted by points
        /// descending, the best entry holds position 1, positions never
        /// decrease, and each position equals 1 + the count of strictly
        /// better users.
        #[test]
        fn prop_competition_ranking_invariants(points in proptest::collection::vec(0i64..100, 1..20)) {
            let storage = Arc::new(MemoryStorage::new());
            for (i, pts) in points.iter().enumerate() {
                let id = i as i64 + 1;
                storage.user_insert(&User::new(id, &format!("user{id}"))).unwrap();
                if *pts > 0 {
                    storage.user_add_points(id, *pts).unwrap();
                }
            }
            let ranking = RankingComputer::new(Arc::clone(&storage) as Arc<dyn StorageTrait>);

            let entries = ranking.compute_ranking().unwrap();
            prop_assert_eq!(entries.len(), points.len());
            prop_assert_eq!(entries[0].position, 1);

            for pair in entries.windows(2) {
                prop_assert!(pair[0].points >= pair[1].points);
                prop_assert!(pair[0].position <= pair[1].position);
            }
            for entry in &entries {
                let strictly_ahead = entries.iter().filter(|e| e.points > entry.points).count();
                prop_assert_eq!(entry.position, strictly_ahead as u64 + 1);
            }
        }
    }
}
