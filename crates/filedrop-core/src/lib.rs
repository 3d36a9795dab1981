//! # filedrop-core
//!
//! Types shared across the filedrop crates:
//! - [`AppConfig`] and its sections, loaded from TOML
//! - the persisted [`UserRecord`] and in-memory [`FileRecord`]
//! - SHA-256 content digests and password hashing schemes

// Configuration types shared across all filedrop crates
pub mod config;
pub mod digest;
pub mod error;
pub mod models;
pub mod password;

pub use config::{AppConfig, AuthConfig, CorruptStorePolicy, ServerConfig, StorageConfig};
pub use digest::{ContentHasher, sha256_hex};
pub use error::{ConfigError, PasswordError};
pub use models::{FileRecord, UserRecord};
pub use password::PasswordScheme;
