//! Scoreboard projection
//!
//! Pure read-only view over the user registry: score descending, ties kept
//! in registry order. Snapshot of the moment of the read, never a live
//! stream, and never writes back.

use serde::Serialize;

use crate::registry::UserRegistry;
use crate::store::{self, DocumentStore, USERS_DOC};
use crate::types::Result;

/// One scoreboard row
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoreboardEntry {
    pub username: String,
    pub score: u64,
}

/// Project a registry snapshot into ordered scoreboard rows
pub fn project(registry: &UserRegistry) -> Vec<ScoreboardEntry> {
    let mut entries: Vec<ScoreboardEntry> = registry
        .users
        .iter()
        .map(|u| ScoreboardEntry {
            username: u.username.clone(),
            score: u.score,
        })
        .collect();

    // Stable sort keeps registry order on ties for determinism
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Load the current registry and project it
pub async fn list(store: &dyn DocumentStore) -> Result<Vec<ScoreboardEntry>> {
    let registry: UserRegistry = store::load_or_init(store, USERS_DOC).await?;
    Ok(project(&registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::User;

    fn registry_with(scores: &[(&str, u64)]) -> UserRegistry {
        UserRegistry {
            users: scores
                .iter()
                .map(|(name, score)| User {
                    username: name.to_string(),
                    hash: "h".into(),
                    score: *score,
                    claimed_flags: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_sorted_descending() {
        let board = project(&registry_with(&[("a", 10), ("b", 300), ("c", 50)]));

        let names: Vec<_> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let board = project(&registry_with(&[("first", 100), ("second", 100), ("third", 100)]));

        let names: Vec<_> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_length_matches_registry() {
        assert!(project(&UserRegistry::default()).is_empty());
        assert_eq!(project(&registry_with(&[("a", 0), ("b", 0)])).len(), 2);
    }
}
