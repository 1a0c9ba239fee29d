//! Commit log records
//!
//! The commit log is a text file holding one self-describing record per line.
//!
//! - `codec`: field escaping and splitting for the `ck1` line format
//! - `commit_record`: the commit record, its draft form and its identity
//! - `version_path`: store-relative names of snapshot files

pub mod codec;
pub mod commit_record;
pub mod version_path;

/// Timestamp layout used in records and in `CODEKEEPER_DATE`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
