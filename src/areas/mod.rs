//! On-disk stores of a repository
//!
//! - `branches`: named snapshot directories
//! - `commit_log`: the append-only history
//! - `repository`: the context threaded through every operation
//! - `staging`: files queued for the next commit
//! - `version_store`: immutable file snapshots
//! - `workspace`: the user's working directory

pub mod branches;
pub mod commit_log;
pub mod repository;
pub mod staging;
pub mod version_store;
pub mod workspace;
