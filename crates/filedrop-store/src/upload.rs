//! Upload pipeline.
//!
//! validate -> sanitize -> claim a free stored name -> stream bytes to disk
//! -> digest the written file -> append a registry record.
//!
//! Stored names are claimed with exclusive creation, so two uploads of the
//! same filename can never end up writing the same file. If writing or
//! digesting fails the claimed file is removed and nothing is registered.

use crate::error::{StoreError, StoreResult};
use crate::files::FileStore;
use crate::fsutil::hash_file;
use crate::sanitize::{extension_of, secure_filename, split_extension};
use filedrop_core::FileRecord;
use filedrop_core::models::now_local;
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncRead, AsyncWriteExt};

/// A file payload: the uploader's filename plus a reader over its bytes.
pub struct UploadFile<R> {
    pub filename: String,
    pub reader: R,
}

impl<R> UploadFile<R> {
    pub fn new(filename: impl Into<String>, reader: R) -> Self {
        Self {
            filename: filename.into(),
            reader,
        }
    }
}

impl FileStore {
    /// Store an uploaded file and register it.
    pub async fn upload<R>(
        &self,
        file: Option<UploadFile<R>>,
        sender: Option<&str>,
        receiver: Option<&str>,
    ) -> StoreResult<FileRecord>
    where
        R: AsyncRead + Unpin,
    {
        let Some(UploadFile { filename, mut reader }) = file else {
            return Err(StoreError::NoFile);
        };
        if filename.is_empty() {
            return Err(StoreError::NoFile);
        }

        let ext = extension_of(&filename)
            .filter(|ext| self.config.is_allowed_extension(ext))
            .ok_or_else(|| StoreError::UnsupportedExtension(filename.clone()))?;

        let (sender, receiver) = match (sender, receiver) {
            (Some(s), Some(r)) if !s.is_empty() && !r.is_empty() => (s, r),
            _ => return Err(StoreError::MissingParticipants),
        };

        let mut candidate = secure_filename(&filename);
        if candidate.is_empty() {
            candidate = format!("upload.{}", ext.to_ascii_lowercase());
        }

        let (stored_name, out) = self.claim_stored_name(&candidate).await?;
        let path = self.path_of(&stored_name);

        let (content_hash, size) = match write_and_digest(&mut reader, out, &path).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), error = %cleanup, "Failed to remove partial upload");
                }
                tracing::warn!(%stored_name, error = %e, "Upload failed");
                return Err(e);
            }
        };

        let record = {
            let mut records = self.records.lock().await;
            let record = FileRecord {
                id: records.len() as u64 + 1,
                stored_name,
                original_name: filename,
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                content_hash,
                upload_time: now_local(),
                size,
            };
            records.push(record.clone());
            record
        };

        tracing::info!(
            id = record.id,
            stored_name = %record.stored_name,
            sender = %record.sender,
            receiver = %record.receiver,
            size = record.size,
            "Stored upload"
        );
        Ok(record)
    }

    /// Create the first free name among `a.txt`, `a_1.txt`, `a_2.txt`, ...
    async fn claim_stored_name(&self, candidate: &str) -> StoreResult<(String, File)> {
        let (stem, ext) = split_extension(candidate);
        let mut counter = 0u32;
        loop {
            let name = if counter == 0 {
                candidate.to_string()
            } else {
                format!("{stem}_{counter}{ext}")
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.path_of(&name))
                .await
            {
                Ok(file) => {
                    if counter > 0 {
                        tracing::debug!(%candidate, %name, "Resolved filename collision");
                    }
                    return Ok((name, file));
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => counter += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Copy the payload into `out`, sync it, then digest the file as written.
async fn write_and_digest<R>(reader: &mut R, mut out: File, path: &Path) -> StoreResult<(String, u64)>
where
    R: AsyncRead + Unpin,
{
    tokio::io::copy(reader, &mut out).await?;
    out.flush().await?;
    out.sync_all().await?;
    drop(out);

    let content_hash = hash_file(path).await?;
    let size = fs::metadata(path).await?.len();
    Ok((content_hash, size))
}
