//! Content digest (SHA-256)
//!
//! A `ContentHash` identifies either the bytes of a snapshotted file or a
//! whole commit record.
//!
//! ## Format
//!
//! - Full: 64 hex characters
//! - Short: first 12 characters, used in version file names and output

use crate::artifacts::hash::{CONTENT_HASH_LENGTH, SHORT_HASH_LENGTH};

/// SHA-256 digest in lowercase hexadecimal form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Parse and validate a digest from a string
    ///
    /// Upper-case input is accepted and normalised to lower case.
    pub fn try_parse(hash: &str) -> anyhow::Result<Self> {
        if hash.len() != CONTENT_HASH_LENGTH {
            anyhow::bail!("invalid content hash length: {}", hash.len());
        }
        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid content hash characters: {}", hash);
        }
        Ok(Self(hash.to_ascii_lowercase()))
    }

    pub(crate) fn from_digest(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Abbreviated form of the digest
    pub fn to_short(&self) -> &str {
        &self.0[..SHORT_HASH_LENGTH]
    }

    /// Whether this digest starts with the given (case-insensitive) hex prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
