//! Command implementations
//!
//! - `porcelain`: the user-facing workflow (init, add, commit, rollback,
//!   branch, merge, ...)
//! - `plumbing`: building blocks that inspect content and the log directly
//!   (hash-object, verify)

pub mod plumbing;
pub mod porcelain;
