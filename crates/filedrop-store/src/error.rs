//! Error types for the store crate.

use filedrop_core::PasswordError;
use thiserror::Error;

/// Errors returned by the credential store and the file store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or blank.
    #[error("username and password must not be empty")]
    InvalidInput,

    #[error("username already exists: {0}")]
    DuplicateUser(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("incorrect password")]
    BadPassword,

    /// No file part, or a file part with an empty filename.
    #[error("no file selected")]
    NoFile,

    #[error("file type not supported: {0}")]
    UnsupportedExtension(String),

    #[error("sender and receiver are required")]
    MissingParticipants,

    /// No registry record carries this id.
    #[error("file not found: {0}")]
    NotFound(u64),

    /// The record exists but its bytes are gone from the upload directory.
    #[error("file {id} is missing from storage ({stored_name})")]
    MissingOnDisk { id: u64, stored_name: String },

    /// The users file exists but could not be parsed, and policy says abort.
    #[error("credential store {path} is corrupt: {reason}")]
    CorruptStore { path: String, reason: String },

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Stable snake_case name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DuplicateUser(_) => "duplicate_user",
            Self::UnknownUser(_) => "unknown_user",
            Self::BadPassword => "bad_password",
            Self::NoFile => "no_file",
            Self::UnsupportedExtension(_) => "unsupported_extension",
            Self::MissingParticipants => "missing_participants",
            Self::NotFound(_) | Self::MissingOnDisk { .. } => "not_found",
            Self::CorruptStore { .. } => "corrupt_store",
            Self::Password(_) => "password_error",
            Self::Serialization(_) => "serialization_error",
            Self::Io(_) => "io_error",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
