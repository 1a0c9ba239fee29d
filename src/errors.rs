//! Error kinds raised by the versioning engine.
//!
//! Operations return `anyhow::Result`; the failures a caller may want to
//! react to are raised as [`KeeperError`] values so they can be recovered
//! with `downcast_ref`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeeperError {
    /// No `.repo_path` pointer, or the pointed-to root lacks its stores.
    #[error("repository not initialized ({0}). Run 'codekeeper init'")]
    NotInitialized(String),

    /// A file, commit, branch or version entry is absent.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A commit log line that cannot be parsed under the canonical format.
    #[error("corrupt commit record at line {line}: {detail}")]
    CorruptRecord { line: usize, detail: String },
}

impl KeeperError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        KeeperError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl std::fmt::Display) -> Self {
        KeeperError::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_input(detail: impl Into<String>) -> Self {
        KeeperError::InvalidInput(detail.into())
    }
}

/// Returns the [`KeeperError`] carried by an `anyhow` error chain, if any.
pub fn keeper_error(err: &anyhow::Error) -> Option<&KeeperError> {
    err.chain().find_map(|cause| cause.downcast_ref::<KeeperError>())
}
