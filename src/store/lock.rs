//! Per-document serialization locks
//!
//! The store exposes last-writer-wins semantics with no versioning, so two
//! concurrent read-modify-write cycles against the same document would lose
//! one increment. Every mutating operation acquires the document's mutex
//! for its whole cycle, making transactions against a given document
//! execute one at a time within the process.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of async mutexes keyed on document name
#[derive(Default)]
pub struct DocumentLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DocumentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a document, waiting if another transaction
    /// holds it. The guard must be held across the read, the in-memory
    /// mutation and the write-back.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
