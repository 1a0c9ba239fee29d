//! Content digests
//!
//! Every file captured by a commit and every commit record is identified by a
//! SHA-256 digest rendered as 64 lowercase hexadecimal characters.
//!
//! - `content_hash`: the digest value type
//! - `hasher`: whole-buffer and streamed digest computation

pub mod content_hash;
pub mod hasher;

/// Length of a SHA-256 digest in hexadecimal format
pub const CONTENT_HASH_LENGTH: usize = 64;

/// Number of hex characters used when a digest is shown or embedded in names
pub const SHORT_HASH_LENGTH: usize = 12;
