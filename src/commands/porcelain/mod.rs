//! User-facing operations
//!
//! Every command except `merge-files` runs against an opened [`Repository`]
//! and writes its results to the repository's writer.
//!
//! [`Repository`]: crate::areas::repository::Repository

pub mod add;
pub mod branch;
pub mod commit;
pub mod conflicts;
pub mod history;
pub mod init;
pub mod merge;
pub mod merge_files;
pub mod reset;
pub mod resolve;
pub mod retrieve;
pub mod rollback;
pub mod status;
pub mod switch;
