//! File registry.
//!
//! [`FileStore`] owns the upload directory and the ordered, in-memory list of
//! [`FileRecord`]s. The list is not persisted: ids start again at 1 after a
//! restart while the stored bytes stay on disk.

use crate::error::StoreResult;
use filedrop_core::{FileRecord, StorageConfig};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub struct FileStore {
    pub(crate) config: StorageConfig,
    pub(crate) records: Mutex<Vec<FileRecord>>,
}

impl FileStore {
    /// Open the upload directory, creating it if absent.
    pub async fn open(config: StorageConfig) -> StoreResult<Self> {
        tokio::fs::create_dir_all(&config.upload_dir).await?;
        tracing::info!(root = %config.upload_dir.display(), "Opened upload directory");
        Ok(Self {
            config,
            records: Mutex::new(Vec::new()),
        })
    }

    /// All records in upload order.
    pub async fn list(&self) -> Vec<FileRecord> {
        self.records.lock().await.clone()
    }

    /// Find a record by id.
    pub async fn get(&self, id: u64) -> Option<FileRecord> {
        self.records
            .lock()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.config.upload_dir
    }

    /// On-disk location of a stored name.
    pub fn path_of(&self, stored_name: &str) -> PathBuf {
        self.config.upload_dir.join(stored_name)
    }
}
