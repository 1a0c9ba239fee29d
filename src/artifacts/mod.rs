//! Value types and algorithms
//!
//! - `branch`: branch and project names
//! - `core`: shared utilities (atomic writes, clock, pager, batch reports)
//! - `hash`: content digests
//! - `log`: the commit record format and version names
//! - `merge`: two-way line merge and conflict resolution
//! - `status`: working directory inspection

pub mod branch;
pub mod core;
pub mod hash;
pub mod log;
pub mod merge;
pub mod status;
