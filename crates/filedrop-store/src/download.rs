//! Download resolver.

use crate::error::{StoreError, StoreResult};
use crate::files::FileStore;
use filedrop_core::FileRecord;
use tokio::fs::File;

/// An opened stored file, ready to be streamed back.
#[derive(Debug)]
pub struct Download {
    pub record: FileRecord,
    pub file: File,
    pub len: u64,
}

impl Download {
    /// Name the client should save the file under.
    pub fn filename(&self) -> &str {
        &self.record.original_name
    }
}

impl FileStore {
    /// Resolve an id to its record and open the stored bytes.
    pub async fn download(&self, id: u64) -> StoreResult<Download> {
        let record = self.get(id).await.ok_or(StoreError::NotFound(id))?;
        let path = self.path_of(&record.stored_name);

        let missing = || {
            tracing::warn!(id, path = %path.display(), "Registered file is missing from storage");
            StoreError::MissingOnDisk {
                id,
                stored_name: record.stored_name.clone(),
            }
        };

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing()),
            Err(e) => return Err(e.into()),
        };
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(missing());
        }

        tracing::debug!(id, stored_name = %record.stored_name, "Serving download");
        Ok(Download {
            record,
            file,
            len: meta.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsutil::hash_file;
    use crate::upload::UploadFile;
    use filedrop_core::{StorageConfig, sha256_hex};
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    async fn store_in(dir: &TempDir) -> FileStore {
        FileStore::open(StorageConfig {
            upload_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_bytes_and_digest() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        let data: Vec<u8> = (0..200_000u32).map(|i| (i * 7 % 256) as u8).collect();

        let record = store
            .upload(
                Some(UploadFile::new("blob.pdf", data.as_slice())),
                Some("alice"),
                Some("bob"),
            )
            .await
            .unwrap();

        let mut download = store.download(record.id).await.unwrap();
        assert_eq!(download.len, data.len() as u64);
        assert_eq!(download.filename(), "blob.pdf");

        let mut fetched = Vec::new();
        download.file.read_to_end(&mut fetched).await.unwrap();
        assert_eq!(fetched, data);
        assert_eq!(sha256_hex(&fetched), record.content_hash);
        assert_eq!(
            hash_file(&store.path_of(&record.stored_name)).await.unwrap(),
            record.content_hash
        );
    }

    #[tokio::test]
    async fn test_download_labels_with_original_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        store
            .upload(Some(UploadFile::new("my note.txt", &b"1"[..])), Some("a"), Some("b"))
            .await
            .unwrap();
        let second = store
            .upload(Some(UploadFile::new("my note.txt", &b"2"[..])), Some("a"), Some("b"))
            .await
            .unwrap();

        let download = store.download(second.id).await.unwrap();
        assert_eq!(download.record.stored_name, "my_note_1.txt");
        assert_eq!(download.filename(), "my note.txt");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;

        assert!(matches!(
            store.download(42).await,
            Err(StoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_deleted_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).await;
        let record = store
            .upload(Some(UploadFile::new("gone.txt", &b"bye"[..])), Some("a"), Some("b"))
            .await
            .unwrap();

        tokio::fs::remove_file(store.path_of(&record.stored_name))
            .await
            .unwrap();

        let err = store.download(record.id).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingOnDisk { id: 1, .. }));
        assert_eq!(err.code(), "not_found");
        // The record itself is still listed.
        assert_eq!(store.len().await, 1);
    }
}
