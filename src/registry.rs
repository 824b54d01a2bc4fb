//! User registry
//!
//! The set of registered accounts, persisted wholesale as `users.json`.
//! Usernames are unique and immutable; scores only ever grow, and only
//! through the claim transaction.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::store::{self, DocumentLocks, DocumentStore, USERS_DOC};
use crate::types::{FlagstandError, Result};

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, immutable after creation
    pub username: String,
    /// PHC-formatted argon2 digest of the account secret
    pub hash: String,
    #[serde(default)]
    pub score: u64,
    /// Flag ids already credited to this user, no duplicates
    #[serde(default, rename = "claimedFlags")]
    pub claimed_flags: Vec<String>,
}

/// In-memory snapshot of the `users.json` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRegistry {
    #[serde(default)]
    pub users: Vec<User>,
}

impl UserRegistry {
    /// Exact, case-sensitive lookup
    pub fn find_by_username(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == name)
    }

    /// Append a new account with zero score and no claims
    ///
    /// Fails with `DuplicateUsername` and leaves the registry unchanged if
    /// the name is taken.
    pub fn register(&mut self, username: &str, hash: String) -> Result<&User> {
        if self.find_by_username(username).is_some() {
            return Err(FlagstandError::DuplicateUsername);
        }

        self.users.push(User {
            username: username.to_string(),
            hash,
            score: 0,
            claimed_flags: Vec::new(),
        });

        Ok(self.users.last().expect("just pushed"))
    }

    /// Credit a claim: increment score and record the flag id.
    ///
    /// The caller must already have verified the flag was not previously
    /// claimed by this user; no re-check happens here and calling twice
    /// for the same flag double-credits.
    pub fn apply_claim(&mut self, username: &str, flag_id: &str, points: u64) -> Result<u64> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(FlagstandError::UserNotFound)?;

        user.score += points;
        user.claimed_flags.push(flag_id.to_string());

        Ok(user.score)
    }
}

/// Register a new account against the persisted registry.
///
/// Holds the registry document lock across the whole read-modify-write
/// cycle so concurrent registrations of the same name cannot both succeed.
pub async fn register_account(
    store: &dyn DocumentStore,
    locks: &Arc<DocumentLocks>,
    username: &str,
    hash: String,
) -> Result<()> {
    let _guard = locks.acquire(USERS_DOC).await;

    let mut registry: UserRegistry = store::load_or_init(store, USERS_DOC).await?;
    registry.register(username, hash)?;
    store::save(store, USERS_DOC, &registry).await?;

    info!(username = %username, "Registered new account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    #[test]
    fn test_register_and_find() {
        let mut registry = UserRegistry::default();

        registry.register("alice", "$argon2id$hash".into()).unwrap();

        let user = registry.find_by_username("alice").unwrap();
        assert_eq!(user.score, 0);
        assert!(user.claimed_flags.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut registry = UserRegistry::default();
        registry.register("alice", "h".into()).unwrap();

        assert!(registry.find_by_username("Alice").is_none());
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut registry = UserRegistry::default();
        registry.register("alice", "h1".into()).unwrap();

        let err = registry.register("alice", "h2".into()).unwrap_err();
        assert!(matches!(err, FlagstandError::DuplicateUsername));

        assert_eq!(registry.users.len(), 1);
        assert_eq!(registry.users[0].hash, "h1");
    }

    #[test]
    fn test_apply_claim_increments_score() {
        let mut registry = UserRegistry::default();
        registry.register("alice", "h".into()).unwrap();

        let score = registry.apply_claim("alice", "f1", 100).unwrap();
        assert_eq!(score, 100);

        let score = registry.apply_claim("alice", "f2", 50).unwrap();
        assert_eq!(score, 150);

        let user = registry.find_by_username("alice").unwrap();
        assert_eq!(user.claimed_flags, vec!["f1", "f2"]);
    }

    #[test]
    fn test_apply_claim_unknown_user() {
        let mut registry = UserRegistry::default();
        let err = registry.apply_claim("ghost", "f1", 10).unwrap_err();
        assert!(matches!(err, FlagstandError::UserNotFound));
    }

    #[test]
    fn test_serde_shape_matches_persisted_layout() {
        let mut registry = UserRegistry::default();
        registry.register("alice", "h".into()).unwrap();
        registry.apply_claim("alice", "f1", 100).unwrap();

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["users"][0]["username"], "alice");
        assert_eq!(json["users"][0]["score"], 100);
        assert_eq!(json["users"][0]["claimedFlags"][0], "f1");
    }

    #[tokio::test]
    async fn test_register_account_persists() {
        let store = MemoryDocumentStore::new();
        let locks = Arc::new(DocumentLocks::new());

        register_account(&store, &locks, "alice", "h".into())
            .await
            .unwrap();

        let registry: UserRegistry = crate::store::load_or_init(&store, USERS_DOC).await.unwrap();
        assert!(registry.find_by_username("alice").is_some());
    }

    #[tokio::test]
    async fn test_concurrent_registrations_of_same_name_yield_one_account() {
        let store = Arc::new(MemoryDocumentStore::new());
        let locks = Arc::new(DocumentLocks::new());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let locks = Arc::clone(&locks);
                tokio::spawn(async move {
                    register_account(store.as_ref(), &locks, "alice", "h".into()).await
                })
            })
            .collect();

        let mut successes = 0;
        for t in tasks {
            if t.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);

        let registry: UserRegistry = crate::store::load_or_init(store.as_ref(), USERS_DOC)
            .await
            .unwrap();
        assert_eq!(registry.users.len(), 1);
    }
}
