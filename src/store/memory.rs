//! In-memory document store for tests and dev mode

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::store::DocumentStore;
use crate::types::Result;

/// Document store backed by a concurrent in-process map
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<String, Bytes>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.docs.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        self.docs.insert(key.to_string(), data);
        Ok(())
    }
}
