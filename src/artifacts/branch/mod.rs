pub mod branch_name;

/// Names usable as project and branch directory names
pub const SAFE_NAME_REGEX: &str = r"^[a-zA-Z0-9_-]+$";

/// Prefix of the files written by a branch merge
pub const MERGED_FILE_PREFIX: &str = "merged_";
