//! Core utilities and shared types
//!
//! - `atomic`: write-to-temp-then-rename file helpers
//! - `batch_report`: per-item outcome of multi-file operations
//! - `clock`: the time source used to stamp commits
//! - `pager`: `Write` adapter over the minus pager

pub mod atomic;
pub mod batch_report;
pub mod clock;
pub mod pager;
