//! Low-level operations: digesting a file and checking the log against the
//! version store

pub mod hash_object;
pub mod verify;
