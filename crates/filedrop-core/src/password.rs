//! Password hashing schemes.
//!
//! Two on-disk formats are understood:
//! - `sha256`: unsalted SHA-256 of the UTF-8 password, lowercase hex. This is
//!   the legacy format of existing users files and stays the default so those
//!   files keep working unchanged. It is deterministic and weak.
//! - `argon2`: Argon2id PHC strings with a random salt.
//!
//! Verification looks at the stored hash itself, so a users file may mix
//! both formats while it is being migrated.

use crate::digest::{is_sha256_hex, sha256_hex};
use crate::error::PasswordError;
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Unsalted single-round SHA-256 (legacy).
    #[default]
    Sha256,
    /// Salted Argon2id.
    Argon2,
}

impl PasswordScheme {
    /// Hash a password with this scheme.
    pub fn hash(self, password: &str) -> Result<String, PasswordError> {
        match self {
            PasswordScheme::Sha256 => Ok(sha256_hex(password.as_bytes())),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordError::Hash(e.to_string()))
            }
        }
    }

    /// Detect which scheme produced a stored hash.
    pub fn of_hash(stored: &str) -> Option<PasswordScheme> {
        if stored.starts_with("$argon2") {
            Some(PasswordScheme::Argon2)
        } else if is_sha256_hex(stored) {
            Some(PasswordScheme::Sha256)
        } else {
            None
        }
    }
}

/// Check `password` against a stored hash of either scheme.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    match PasswordScheme::of_hash(stored) {
        Some(PasswordScheme::Sha256) => {
            Ok(sha256_hex(password.as_bytes()).eq_ignore_ascii_case(stored))
        }
        Some(PasswordScheme::Argon2) => {
            let parsed =
                PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        }
        None => Err(PasswordError::MalformedHash(format!(
            "unrecognized hash format ({} chars)",
            stored.len()
        ))),
    }
}
