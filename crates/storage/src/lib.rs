//! Storage abstraction and implementations for studytrack.
//!
//! This crate provides a trait-based persistence interface for the
//! progress snapshot with a JSON-file reference implementation.

#![warn(missing_docs)]

pub mod json_storage;
pub mod trait_;

pub use json_storage::{JsonStorage, SNAPSHOT_FILE};
pub use trait_::{Result, Storage, StorageError};
