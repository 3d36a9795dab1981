use filedrop_core::AppConfig;
use filedrop_store::{CredentialStore, FileStore, StoreResult};
use std::sync::Arc;

/// Shared application state, built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    users: CredentialStore,
    files: FileStore,
}

impl AppState {
    /// Open the credential store and upload directory described by `cfg`.
    ///
    /// Leftover staging files from an interrupted run are discarded.
    pub async fn init(cfg: &AppConfig) -> StoreResult<Self> {
        let users = CredentialStore::open(&cfg.storage.users_file, &cfg.auth).await?;
        let files = FileStore::open(cfg.storage.clone()).await?;

        let staging = cfg.staging_dir();
        match tokio::fs::remove_dir_all(&staging).await {
            Ok(()) => tracing::debug!(path = %staging.display(), "Cleared staging directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tokio::fs::create_dir_all(&staging).await?;

        Ok(Self::new(cfg.clone(), users, files))
    }

    pub fn new(config: AppConfig, users: CredentialStore, files: FileStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                files,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn users(&self) -> &CredentialStore {
        &self.inner.users
    }

    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }
}
