//! The Record Store: whole-file JSON array persistence.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Collection name for accounts.
pub const ACCOUNTS: &str = "accounts";
/// Collection name for release versions.
pub const RELEASE_VERSIONS: &str = "release_versions";
/// Collection name for releases.
pub const RELEASES: &str = "releases";

/// Failure while persisting a collection. Reads never produce this --
/// an unreadable or corrupt collection degrades to an empty list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    Init {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write collection '{collection}': {source}")]
    Write {
        collection: String,
        source: std::io::Error,
    },

    #[error("failed to serialize collection '{collection}': {source}")]
    Serialize {
        collection: String,
        source: serde_json::Error,
    },
}

/// Handle to the data directory holding one JSON file per collection.
///
/// An explicit handle rather than module-level paths, so tests can point
/// repositories at a temporary directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// Create the data directory and initialize each missing collection
    /// file to an empty array.
    pub async fn init(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| StoreError::Init {
                path: self.data_dir.clone(),
                source,
            })?;

        for collection in [ACCOUNTS, RELEASE_VERSIONS, RELEASES] {
            let path = self.file_path(collection);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }
            self.save::<serde_json::Value>(collection, &[]).await?;
        }
        Ok(())
    }

    /// Read all records of a collection.
    ///
    /// Fails soft: a missing file, an unreadable file, or invalid JSON all
    /// yield an empty list with a warning, favouring availability over
    /// strict correctness at this scale.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.file_path(collection);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(collection, error = %err, "collection unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(collection, error = %err, "collection holds invalid JSON, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace a collection with the given records.
    ///
    /// Writes to a temp file and renames over the target, so a reader in
    /// this process never observes a partial write. Concurrent writers are
    /// not coordinated; last writer wins.
    pub async fn save<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Serialize {
                collection: collection.to_string(),
                source,
            })?;

        let tmp = self.data_dir.join(format!(".{collection}.json.tmp"));
        let path = self.file_path(collection);

        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.to_string(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.to_string(),
                source,
            })?;
        Ok(())
    }
}
