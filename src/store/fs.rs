//! Filesystem-backed document store
//!
//! Stores each document as a plain file under a root directory, one file
//! per key. The production deployment points this at the data container;
//! the layout is deliberately flat so the documents stay inspectable.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::store::DocumentStore;
use crate::types::{FlagstandError, Result};

/// Document store rooted at a local directory
pub struct FsDocumentStore {
    root_dir: PathBuf,
}

impl FsDocumentStore {
    /// Create a new store at the given directory, creating it if needed
    pub async fn new<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let root_dir = root_dir.as_ref().to_path_buf();

        fs::create_dir_all(&root_dir).await?;

        info!(path = %root_dir.display(), "Initialized document store");

        Ok(Self { root_dir })
    }

    fn doc_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed document names (users.json, flags.json); reject
        // anything that could escape the root.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.starts_with('.') {
            return Err(FlagstandError::Internal(format!(
                "invalid document key: {}",
                key
            )));
        }
        Ok(self.root_dir.join(key))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.doc_path(key)?;

        match fs::read(&path).await {
            Ok(data) => {
                debug!(key = %key, size = data.len(), "Read document");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.doc_path(key)?;

        // Write through a temp file and rename so a crash mid-write never
        // leaves a truncated document behind.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &data).await?;
        fs::rename(&tmp, &path).await?;

        debug!(key = %key, size = data.len(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("flagstand-store-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_get_absent_returns_none() {
        let store = FsDocumentStore::new(temp_root()).await.unwrap();
        assert!(store.get("users.json").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = FsDocumentStore::new(temp_root()).await.unwrap();

        store
            .put("users.json", Bytes::from_static(b"{\"users\":[]}"))
            .await
            .unwrap();

        let data = store.get("users.json").await.unwrap().unwrap();
        assert_eq!(&data[..], b"{\"users\":[]}");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = FsDocumentStore::new(temp_root()).await.unwrap();

        store.put("flags.json", Bytes::from_static(b"a")).await.unwrap();
        store.put("flags.json", Bytes::from_static(b"b")).await.unwrap();

        let data = store.get("flags.json").await.unwrap().unwrap();
        assert_eq!(&data[..], b"b");
    }

    #[tokio::test]
    async fn test_rejects_path_traversal_keys() {
        let store = FsDocumentStore::new(temp_root()).await.unwrap();

        assert!(store.get("../users.json").await.is_err());
        assert!(store.put("./x", Bytes::new()).await.is_err());
        assert!(store.get("").await.is_err());
    }
}
