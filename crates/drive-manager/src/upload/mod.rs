//! Upload ingestion: flatten a file selection or a dropped directory tree
//! into upload tasks and submit them with per-task failure isolation.

pub mod ingest;
pub mod local;
pub mod memory;
pub mod source;

use serde::Serialize;

use drive_entity::EntryId;
use drive_gateway::Blob;

pub use ingest::UploadIngestor;
pub use source::{DirectoryHandle, DirectoryReader, DroppedItem};

/// A file picked in a file chooser. Selections are flat.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub blob: Blob,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, blob: impl Into<Blob>) -> Self {
        Self {
            name: name.into(),
            blob: blob.into(),
        }
    }
}

/// One file to send. `relative_path` is `/`-separated, relative to the
/// drop root, and ends with the file's own name.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub blob: Blob,
    pub relative_path: String,
    pub target_parent_id: Option<EntryId>,
}

/// A task that did not make it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub relative_path: String,
    pub message: String,
}

/// Outcome of a batch. `success_count + failure_count` equals the number of
/// tasks submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadBatchResult {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<UploadFailure>,
}

impl UploadBatchResult {
    /// Number of tasks attempted.
    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Whether every task succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }
}
