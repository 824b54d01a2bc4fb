//! Document store for flagstand
//!
//! The registry and catalog live as whole JSON documents behind an opaque
//! key-to-bytes store. Everything above this layer does a full
//! read-modify-write cycle per request; the [`DocumentLocks`] registry
//! serializes those cycles per document (see `documents`).

pub mod documents;
pub mod fs;
pub mod lock;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

use crate::types::Result;

pub use documents::{ensure_defaults, load_or_init, save, FLAGS_DOC, USERS_DOC};
pub use fs::FsDocumentStore;
pub use lock::DocumentLocks;
pub use memory::MemoryDocumentStore;

/// Opaque key-to-bytes storage with last-writer-wins semantics.
///
/// No versioning and no ordering guarantees; callers that mutate must
/// serialize their read-modify-write cycle through [`DocumentLocks`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by key, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write a document, overwriting any previous content
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;
}
