use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::ConfigurationError;

/// Fingerprints bytes for dependency identity. Not used for integrity checks.
pub trait IdentityHasher {
    /// Lowercase hex digest of `bytes`.
    fn hex_digest(&self, bytes: &[u8]) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Resolve an algorithm from its configured name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            _ => Err(ConfigurationError::UnsupportedHash(name.to_string())),
        }
    }
}

impl IdentityHasher for HashAlgorithm {
    fn hex_digest(&self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}
