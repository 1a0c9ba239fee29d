#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed commit time handed to every invocation through `CODEKEEPER_DATE`
pub const FIXED_DATE: &str = "2024-01-01 12:00:00";

/// Project name used by the `init` fixture
pub const PROJECT: &str = "project";
