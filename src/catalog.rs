//! Flag catalog
//!
//! The set of valid flag secrets, persisted as `flags.json`. Flags are
//! provisioned out-of-band (seed file at startup) and never mutated by
//! request handling: a flag may be claimed once per user, by any number
//! of users, so claims touch only the registry.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::store::{self, DocumentStore, FLAGS_DOC};
use crate::types::{FlagstandError, Result};

/// A single flag definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    /// Stable identifier, distinct from the secret string
    pub id: String,
    /// The string a player must submit verbatim
    #[serde(rename = "flag")]
    pub secret: String,
    pub points: u64,
}

/// In-memory snapshot of the `flags.json` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagCatalog {
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl FlagCatalog {
    /// Exact string match against the submitted text
    pub fn find_by_secret(&self, secret: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.secret == secret)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Seed the catalog from a JSON file when the persisted catalog is empty.
///
/// The seed file uses the same shape as the persisted document. An already
/// populated catalog is left alone so a redeploy never clobbers live data.
pub async fn seed_from_file(store: &dyn DocumentStore, path: &Path) -> Result<()> {
    let current: FlagCatalog = store::load_or_init(store, FLAGS_DOC).await?;
    if !current.is_empty() {
        info!(count = current.flags.len(), "Flag catalog already populated, skipping seed");
        return Ok(());
    }

    let data = tokio::fs::read(path).await.map_err(|e| {
        FlagstandError::Config(format!("failed to read flag seed {}: {}", path.display(), e))
    })?;
    let seeded: FlagCatalog = serde_json::from_slice(&data)
        .map_err(|e| FlagstandError::Config(format!("invalid flag seed: {}", e)))?;

    store::save(store, FLAGS_DOC, &seeded).await?;
    info!(count = seeded.flags.len(), "Seeded flag catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn catalog() -> FlagCatalog {
        FlagCatalog {
            flags: vec![
                Flag {
                    id: "f-web-1".into(),
                    secret: "FLAG{test}".into(),
                    points: 100,
                },
                Flag {
                    id: "f-crypto-1".into(),
                    secret: "FLAG{rot13}".into(),
                    points: 250,
                },
            ],
        }
    }

    #[test]
    fn test_find_by_secret_exact_match() {
        let catalog = catalog();

        assert_eq!(catalog.find_by_secret("FLAG{test}").unwrap().points, 100);
        assert!(catalog.find_by_secret("FLAG{TEST}").is_none());
        assert!(catalog.find_by_secret("FLAG{test} ").is_none());
        assert!(catalog.find_by_secret("").is_none());
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert_eq!(json["flags"][0]["flag"], "FLAG{test}");
        assert_eq!(json["flags"][0]["id"], "f-web-1");
    }

    #[tokio::test]
    async fn test_seed_skips_populated_catalog() {
        let store = MemoryDocumentStore::new();
        store::save(&store, FLAGS_DOC, &catalog()).await.unwrap();

        let seed_path = std::env::temp_dir().join(format!("seed-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&seed_path, b"{\"flags\":[]}").await.unwrap();

        seed_from_file(&store, &seed_path).await.unwrap();

        let after: FlagCatalog = store::load_or_init(&store, FLAGS_DOC).await.unwrap();
        assert_eq!(after.flags.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_populates_empty_catalog() {
        let store = MemoryDocumentStore::new();

        let seed_path = std::env::temp_dir().join(format!("seed-{}.json", uuid::Uuid::new_v4()));
        let seed = serde_json::to_vec(&catalog()).unwrap();
        tokio::fs::write(&seed_path, seed).await.unwrap();

        seed_from_file(&store, &seed_path).await.unwrap();

        let after: FlagCatalog = store::load_or_init(&store, FLAGS_DOC).await.unwrap();
        assert!(after.find_by_secret("FLAG{rot13}").is_some());
    }
}
