//! Filesystem helpers shared by the stores.

use filedrop_core::ContentHasher;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

/// Chunk size for digesting files (64 KiB).
pub const DIGEST_CHUNK_SIZE: usize = 64 * 1024;

/// Replace `path` with `data` by writing a sibling temp file, syncing it and
/// renaming it over the target. Readers see either the old or the new content.
pub async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = temp_sibling(path);
    let result = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp.{}", name, Uuid::new_v4()))
}

/// Stream a file through SHA-256 in fixed-size chunks and return its hex digest.
pub async fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = fs::File::open(path).await?;
    let mut hasher = ContentHasher::new();
    let mut buf = vec![0u8; DIGEST_CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_core::sha256_hex;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"second");
        // No temp files left behind.
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_hash_file_spans_chunks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.bin");
        let data: Vec<u8> = (0..(DIGEST_CHUNK_SIZE * 3 + 17))
            .map(|i| (i % 251) as u8)
            .collect();
        fs::write(&path, &data).await.unwrap();

        assert_eq!(hash_file(&path).await.unwrap(), sha256_hex(&data));
    }
}
