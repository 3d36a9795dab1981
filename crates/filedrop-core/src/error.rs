//! Error types for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::AppConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}
