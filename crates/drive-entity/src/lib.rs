//! # drive-entity
//!
//! Domain value objects for the Cloud Drive client. [`file::FileEntry`] is
//! the read-only snapshot of a remote entry; [`file::wire`] holds the JSON
//! shapes spoken by the file store API.

pub mod file;

pub use file::model::{EntryId, FileEntry};
