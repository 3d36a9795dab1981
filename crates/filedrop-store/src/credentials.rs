//! Credential store.
//!
//! Keeps the username -> [`UserRecord`] mapping in memory and mirrors it to a
//! single JSON file, rewritten in full (atomically) after every mutation.
//! Mutations are serialized by one async mutex, so the duplicate-username
//! check and the insert cannot interleave.

use crate::error::{StoreError, StoreResult};
use crate::fsutil::write_atomic;
use filedrop_core::models::now_local;
use filedrop_core::password::verify_password;
use filedrop_core::{AuthConfig, CorruptStorePolicy, PasswordError, PasswordScheme, UserRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Users keyed by (case-sensitive) username.
pub type UserMap = BTreeMap<String, UserRecord>;

/// Result of reading the users file.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file existed and parsed.
    Loaded(UserMap),
    /// No file yet; the mapping holds only the bootstrap admin.
    Bootstrapped(UserMap),
    /// The file exists but is not a valid mapping.
    Corrupt { reason: String },
}

pub struct CredentialStore {
    path: PathBuf,
    scheme: PasswordScheme,
    users: Mutex<UserMap>,
}

impl CredentialStore {
    /// Create a store over an already loaded mapping.
    pub fn new(path: impl Into<PathBuf>, scheme: PasswordScheme, users: UserMap) -> Self {
        Self {
            path: path.into(),
            scheme,
            users: Mutex::new(users),
        }
    }

    /// Read the users file without deciding what to do about corruption.
    pub async fn load(path: &Path, auth: &AuthConfig) -> StoreResult<LoadOutcome> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let password = auth.resolve_admin_password();
                let admin = UserRecord::new(auth.password_scheme.hash(&password)?, true);
                let mut users = UserMap::new();
                users.insert(auth.admin_username.clone(), admin);
                return Ok(LoadOutcome::Bootstrapped(users));
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<UserMap>(&raw) {
            Ok(users) => Ok(LoadOutcome::Loaded(users)),
            Err(e) => Ok(LoadOutcome::Corrupt {
                reason: e.to_string(),
            }),
        }
    }

    /// Load the users file and apply the configured corruption policy.
    ///
    /// A freshly bootstrapped mapping is written out immediately.
    pub async fn open(path: impl Into<PathBuf>, auth: &AuthConfig) -> StoreResult<Self> {
        let path = path.into();
        let users = match Self::load(&path, auth).await? {
            LoadOutcome::Loaded(users) => {
                tracing::info!(path = %path.display(), users = users.len(), "Loaded credential store");
                users
            }
            LoadOutcome::Bootstrapped(users) => {
                save(&path, &users).await?;
                tracing::warn!(
                    path = %path.display(),
                    username = %auth.admin_username,
                    "Bootstrapped admin user (password taken from env/config)"
                );
                users
            }
            LoadOutcome::Corrupt { reason } => match auth.on_corrupt_store {
                CorruptStorePolicy::Reset => {
                    tracing::warn!(
                        path = %path.display(),
                        %reason,
                        "Credential store is corrupt, continuing with no users"
                    );
                    UserMap::new()
                }
                CorruptStorePolicy::Abort => {
                    return Err(StoreError::CorruptStore {
                        path: path.display().to_string(),
                        reason,
                    });
                }
            },
        };

        Ok(Self::new(path, auth.password_scheme, users))
    }

    /// Register a new non-admin user and persist.
    pub async fn register(&self, username: &str, password: &str) -> StoreResult<()> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput);
        }

        let mut users = self.users.lock().await;
        if users.contains_key(username) {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }

        let record = UserRecord::new(self.scheme.hash(password)?, false);
        users.insert(username.to_string(), record);
        if let Err(e) = save(&self.path, &users).await {
            users.remove(username);
            return Err(e);
        }

        tracing::info!(%username, "Registered user");
        Ok(())
    }

    /// Check a password, record the login and return the admin flag.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<bool> {
        let username = username.trim();
        let password = password.trim();

        let mut users = self.users.lock().await;
        let Some(current) = users.get(username) else {
            tracing::warn!(%username, "Login for unknown user");
            return Err(StoreError::UnknownUser(username.to_string()));
        };

        match verify_password(password, &current.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(%username, "Login with wrong password");
                return Err(StoreError::BadPassword);
            }
            Err(PasswordError::MalformedHash(reason)) => {
                tracing::warn!(%username, %reason, "Stored password hash is unreadable");
                return Err(StoreError::BadPassword);
            }
            Err(e) => return Err(e.into()),
        }

        let mut updated = current.clone();
        if PasswordScheme::of_hash(&updated.password_hash) != Some(self.scheme) {
            updated.password_hash = self.scheme.hash(password)?;
            tracing::info!(%username, scheme = ?self.scheme, "Re-hashed password");
        }
        updated.last_login = Some(now_local());
        let is_admin = updated.is_admin;

        let previous = users.insert(username.to_string(), updated);
        if let Err(e) = save(&self.path, &users).await {
            if let Some(previous) = previous {
                users.insert(username.to_string(), previous);
            }
            return Err(e);
        }

        tracing::info!(%username, is_admin, "User logged in");
        Ok(is_admin)
    }

    /// Usernames of all non-admin users, in key order.
    pub async fn list_users(&self) -> Vec<String> {
        self.users
            .lock()
            .await
            .iter()
            .filter(|(_, user)| !user.is_admin)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Look up one user.
    pub async fn get(&self, username: &str) -> Option<UserRecord> {
        self.users.lock().await.get(username).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize the full mapping and replace the users file.
pub async fn save(path: &Path, users: &UserMap) -> StoreResult<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    users.serialize(&mut ser)?;
    write_atomic(path, &buf).await?;
    Ok(())
}
