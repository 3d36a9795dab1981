//! HTTP server configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:5000"
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Attach a permissive CORS layer (browser clients are served from elsewhere).
    #[serde(default = "default_cors")]
    pub cors: bool,

    /// Request body limit for `/upload`, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_cors() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors: default_cors(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
