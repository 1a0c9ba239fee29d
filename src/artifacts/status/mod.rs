//! Working directory inspection
//!
//! ## Components
//!
//! - `bypass`: the `.bypass` ignore list consulted by `commit`
//! - `file_change`: categories reported by `status`
//! - `inspector`: conflict detection against the latest recorded versions
//! - `status_info`: status aggregation over the working directory

pub mod bypass;
pub mod file_change;
pub mod inspector;
pub mod status_info;
