//! Configuration types for the filedrop service.
//!
//! Configuration is read from a single TOML file (default `filedrop.toml`).
//! Every section and field has a default, so an empty file (or no file at
//! all) yields a working configuration.
//!
//! # Sections
//!
//! - **server**: bind address, CORS, upload body limit
//! - **storage**: upload directory, users file, extension allow-list
//! - **auth**: bootstrap admin, password scheme, corrupt-store policy

pub mod auth;
pub mod server;
pub mod storage;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub use auth::{AuthConfig, CorruptStorePolicy};
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Config file used when no path is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "filedrop.toml";

/// Complete filedrop configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// On-disk locations and upload policy.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Credential store settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("no {} found, using default configuration", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        cfg.validated()
    }

    /// Parse a configuration file without validating it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values and normalize the extension allow-list.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.server.bind.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            field: "server.bind",
            message: format!("{:?}: {}", self.server.bind, e),
        })?;

        self.storage.allowed_extensions = self
            .storage
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if self.storage.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage.allowed_extensions",
                message: "at least one extension must be allowed".to_string(),
            });
        }

        if self.auth.admin_username.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "auth.admin_username",
                message: "must not be empty".to_string(),
            });
        }

        Ok(self)
    }

    /// Directory used to spool multipart uploads before they are stored.
    pub fn staging_dir(&self) -> PathBuf {
        self.storage.upload_dir.join(".staging")
    }
}
