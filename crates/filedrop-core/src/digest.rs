//! SHA-256 content digests, hex encoded.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Compute the lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `s` looks like a hex SHA-256 digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == SHA256_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Incremental SHA-256 hasher for content fed in chunks.
#[derive(Default, Clone)]
pub struct ContentHasher(Sha256);

impl ContentHasher {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    /// Feed the next chunk of content.
    pub fn update(&mut self, chunk: &[u8]) {
        self.0.update(chunk);
    }

    /// Consume the hasher and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.0.finalize())
    }
}
