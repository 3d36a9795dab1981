//! # filedrop-store
//!
//! State behind the filedrop HTTP surface.
//!
//! This crate provides:
//! - [`CredentialStore`]: username -> user record mapping persisted to one
//!   JSON file, with registration and password checks
//! - [`FileStore`]: the upload directory plus the in-memory registry of
//!   uploaded files
//! - the upload pipeline ([`FileStore::upload`]) and download resolver
//!   ([`FileStore::download`])
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use filedrop_core::{AuthConfig, StorageConfig};
//! use filedrop_store::{CredentialStore, FileStore, UploadFile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let users = CredentialStore::open("users.json", &AuthConfig::default()).await?;
//! users.register("alice", "pw1").await?;
//! let is_admin = users.authenticate("alice", "pw1").await?;
//! assert!(!is_admin);
//!
//! let files = FileStore::open(StorageConfig::default()).await?;
//! let record = files
//!     .upload(Some(UploadFile::new("note.txt", &b"hi"[..])), Some("alice"), Some("bob"))
//!     .await?;
//! let download = files.download(record.id).await?;
//! assert_eq!(download.filename(), "note.txt");
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod download;
pub mod error;
pub mod files;
pub mod fsutil;
pub mod sanitize;
pub mod upload;

pub use credentials::{CredentialStore, LoadOutcome, UserMap};
pub use download::Download;
pub use error::{StoreError, StoreResult};
pub use files::FileStore;
pub use upload::UploadFile;
