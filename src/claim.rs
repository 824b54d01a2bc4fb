//! Claim transaction
//!
//! The core of the service: given an authenticated username and a raw
//! submitted string, decide acceptance and credit the score at most once
//! per user per flag.
//!
//! The whole read-modify-write cycle runs under the registry document
//! lock. Without it, two concurrent submissions that both pass the prior
//! claim check would each report success and the later write-back would
//! silently overwrite the earlier increment.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::catalog::FlagCatalog;
use crate::registry::UserRegistry;
use crate::store::{self, DocumentLocks, DocumentStore, FLAGS_DOC, USERS_DOC};
use crate::types::{FlagstandError, Result};

/// Result of an accepted claim
#[derive(Debug, Clone, Serialize)]
pub struct ClaimOutcome {
    pub points_awarded: u64,
    pub new_score: u64,
}

/// Run the claim transaction for `username` submitting `submitted_flag`.
///
/// The caller has already authenticated the principal and parsed a
/// non-empty flag string from the request body.
///
/// All validation happens on an in-memory snapshot; nothing is persisted
/// until every check passes, so a failure at any step leaves no externally
/// visible effect.
pub async fn submit_flag(
    store: &dyn DocumentStore,
    locks: &Arc<DocumentLocks>,
    username: &str,
    submitted_flag: &str,
) -> Result<ClaimOutcome> {
    let _guard = locks.acquire(USERS_DOC).await;

    let mut registry: UserRegistry = store::load_or_init(store, USERS_DOC).await?;
    let catalog: FlagCatalog = store::load_or_init(store, FLAGS_DOC).await?;

    let user = registry
        .find_by_username(username)
        .ok_or(FlagstandError::UserNotFound)?;

    let flag = catalog
        .find_by_secret(submitted_flag)
        .ok_or(FlagstandError::InvalidFlag)?;

    if user.claimed_flags.iter().any(|id| id == &flag.id) {
        return Err(FlagstandError::AlreadyClaimed);
    }

    let new_score = registry.apply_claim(username, &flag.id, flag.points)?;
    store::save(store, USERS_DOC, &registry).await?;

    info!(
        username = %username,
        flag_id = %flag.id,
        points = flag.points,
        new_score,
        "Flag accepted"
    );

    Ok(ClaimOutcome {
        points_awarded: flag.points,
        new_score,
    })
}
