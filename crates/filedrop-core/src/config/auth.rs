//! Credential store configuration.

use crate::password::PasswordScheme;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `[auth].admin_password`.
pub const ADMIN_PASSWORD_ENV: &str = "FILEDROP_ADMIN_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username of the bootstrap admin created when no users file exists.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Initial bootstrap admin password. For security: prefer setting env var
    /// `FILEDROP_ADMIN_PASSWORD`.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Scheme used for newly stored password hashes.
    #[serde(default)]
    pub password_scheme: PasswordScheme,

    /// What to do when the users file exists but cannot be parsed.
    #[serde(default)]
    pub on_corrupt_store: CorruptStorePolicy,
}

impl AuthConfig {
    /// Bootstrap admin password, checking the environment first.
    pub fn resolve_admin_password(&self) -> String {
        match std::env::var(ADMIN_PASSWORD_ENV) {
            Ok(password) if !password.trim().is_empty() => password,
            _ => self.admin_password.clone(),
        }
    }
}

/// Policy applied when the persisted credential mapping is unreadable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CorruptStorePolicy {
    /// Continue with an empty mapping; the file is overwritten on the next write.
    #[default]
    Reset,
    /// Refuse to start.
    Abort,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            password_scheme: PasswordScheme::default(),
            on_corrupt_store: CorruptStorePolicy::default(),
        }
    }
}
