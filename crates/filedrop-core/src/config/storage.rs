//! Storage configuration.
//!
//! Where uploaded bytes and the credential file live, and which file
//! extensions the upload pipeline accepts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for on-disk state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded files. Created at startup if absent.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// JSON file holding the username -> user record mapping.
    #[serde(default = "default_users_file")]
    pub users_file: PathBuf,

    /// Accepted file extensions (case-insensitive, without the dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl StorageConfig {
    /// Check an extension against the allow-list.
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == ext)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            users_file: default_users_file(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_users_file() -> PathBuf {
    PathBuf::from("users.json")
}

fn default_allowed_extensions() -> Vec<String> {
    ["txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check_ignores_case() {
        let cfg = StorageConfig::default();
        assert!(cfg.is_allowed_extension("PDF"));
        assert!(cfg.is_allowed_extension("docx"));
        assert!(!cfg.is_allowed_extension("exe"));
        assert!(!cfg.is_allowed_extension(""));
    }
}
