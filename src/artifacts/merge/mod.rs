//! Two-way line merge
//!
//! ## Algorithm
//!
//! Both inputs are read line by line in lockstep:
//!
//! - equal lines are emitted once
//! - differing lines are handed to a [`resolver::ConflictResolver`], which
//!   either writes a conflict block or asks the user
//! - once one side runs out, the rest of the other side is emitted as is
//!
//! Lines are compared by position only. A line inserted near the top of one
//! file shifts every later comparison and shows up as a run of conflicts.

pub mod line_merge;
pub mod resolver;

pub const CONFLICT_START: &str = "<<<<<<<";
pub const CONFLICT_SEPARATOR: &str = "=======";
pub const CONFLICT_END: &str = ">>>>>>>";
