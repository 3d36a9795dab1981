//! File handlers: upload, list, download.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State, multipart::Field},
    http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use filedrop_core::FileRecord;
use filedrop_store::UploadFile;
use serde_json::{Value, json};
use std::path::{Path as FsPath, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

/// A multipart file part spooled to the staging directory.
///
/// Form fields can arrive after the file part, so the bytes are parked here
/// until `sender`/`receiver` are known. The file is removed on drop.
struct StagedFile {
    filename: String,
    path: PathBuf,
}

impl StagedFile {
    async fn spool(staging_dir: &FsPath, filename: String, field: &mut Field<'_>) -> Result<Self, ApiError> {
        let staged = Self {
            filename,
            path: staging_dir.join(format!("{}.part", Uuid::new_v4())),
        };
        let mut out = File::create(&staged.path).await?;
        while let Some(chunk) = field.chunk().await? {
            out.write_all(&chunk).await?;
        }
        out.flush().await?;
        Ok(staged)
    }

    async fn open(&self) -> Result<File, ApiError> {
        Ok(File::open(&self.path).await?)
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove staged upload");
        }
    }
}

/// `POST /upload` with multipart fields `file`, `sender`, `receiver`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let staging_dir = state.config().staging_dir();
    let mut staged: Option<StagedFile> = None;
    let mut sender: Option<String> = None;
    let mut receiver: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await? {
        match field.name() {
            Some("file") if staged.is_none() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                staged = Some(StagedFile::spool(&staging_dir, filename, &mut field).await?);
            }
            Some("sender") if sender.is_none() => sender = Some(field.text().await?),
            Some("receiver") if receiver.is_none() => receiver = Some(field.text().await?),
            _ => {}
        }
    }

    let file = match &staged {
        Some(staged) => Some(UploadFile::new(staged.filename.clone(), staged.open().await?)),
        None => None,
    };
    let record = state
        .files()
        .upload(file, sender.as_deref(), receiver.as_deref())
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Upload successful",
        "file": record,
    })))
}

pub async fn list_files(State(state): State<AppState>) -> Json<Vec<FileRecord>> {
    Json(state.files().list().await)
}

/// `GET /download/{id}`: stream the stored bytes as an attachment named
/// after the original filename.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let download = state.files().download(id).await?;
    let content_type = mime_guess::from_path(download.filename())
        .first_or_octet_stream()
        .to_string();
    let disposition = content_disposition(download.filename());
    let len = download.len;
    let body = Body::from_stream(ReaderStream::new(download.file));

    Ok((
        [
            (CONTENT_TYPE, content_type),
            (CONTENT_LENGTH, len.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// `attachment; filename="..."`, plus an RFC 5987 `filename*` when the name
/// is not plain ASCII.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();

    let is_plain = filename
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control());
    if is_plain {
        format!("attachment; filename=\"{fallback}\"")
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("note.txt"),
            "attachment; filename=\"note.txt\""
        );
        assert_eq!(
            content_disposition("a \"quoted\" name.txt"),
            "attachment; filename=\"a _quoted_ name.txt\""
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        assert_eq!(
            content_disposition("tài liệu.pdf"),
            "attachment; filename=\"ti liu.pdf\"; filename*=UTF-8''t%C3%A0i%20li%E1%BB%87u.pdf"
        );
    }

    #[test]
    fn test_content_disposition_strips_control_chars() {
        let value = content_disposition("evil\r\nSet-Cookie: x.txt");
        assert!(!value.contains('\r') && !value.contains('\n'));
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }
}
