//! Gateway trait for remote file store operations.

use std::fmt;
use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use drive_core::result::AppResult;
use drive_entity::{EntryId, FileEntry};

/// A byte stream type used for downloaded file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Content handed to an upload.
#[derive(Debug, Clone)]
pub enum Blob {
    /// Content already held in memory.
    Bytes(Bytes),
    /// A local file, streamed when the upload starts.
    File(PathBuf),
}

impl Blob {
    /// Read the whole blob into memory.
    pub async fn read_all(&self) -> AppResult<Bytes> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
        }
    }
}

impl From<Bytes> for Blob {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&'static str> for Blob {
    fn from(text: &'static str) -> Self {
        Self::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// Gateway operation names, used for logging, call counting and failure
/// injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    /// List a folder.
    List,
    /// Upload a file.
    Upload,
    /// Download a file.
    Download,
    /// Delete a file or folder.
    Delete,
    /// Create a folder.
    CreateFolder,
    /// Rename an entry.
    Rename,
    /// Move an entry to another folder.
    Move,
    /// Fetch text content for preview.
    Preview,
}

impl fmt::Display for GatewayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
            Self::CreateFolder => "create_folder",
            Self::Rename => "rename",
            Self::Move => "move",
            Self::Preview => "preview",
        };
        f.write_str(name)
    }
}

/// Remote operations on the file store.
///
/// Every call is independent; there is no batch endpoint. Failures come
/// back as [`drive_core::ErrorKind::Gateway`] errors carrying the remote
/// message.
#[async_trait]
pub trait MutationGateway: Send + Sync + fmt::Debug + 'static {
    /// List the entries of a folder (`None` = root).
    async fn list(&self, parent_id: Option<EntryId>) -> AppResult<Vec<FileEntry>>;

    /// Upload one file. `filename` may contain `/`-separated folders, which
    /// the store creates below `parent_id` as needed.
    async fn upload(
        &self,
        blob: Blob,
        filename: &str,
        parent_id: Option<EntryId>,
    ) -> AppResult<FileEntry>;

    /// Download a file's content.
    async fn download(&self, id: EntryId) -> AppResult<ByteStream>;

    /// Delete a file or folder. Cascade semantics belong to the store.
    async fn delete(&self, id: EntryId) -> AppResult<()>;

    /// Create a folder.
    async fn create_folder(&self, name: &str, parent_id: Option<EntryId>) -> AppResult<FileEntry>;

    /// Rename an entry.
    async fn rename(&self, id: EntryId, new_name: &str) -> AppResult<FileEntry>;

    /// Move an entry below another folder (`None` = root).
    async fn move_entry(&self, id: EntryId, target_parent_id: Option<EntryId>)
    -> AppResult<FileEntry>;

    /// Fetch the text content of a previewable file.
    async fn preview(&self, id: EntryId) -> AppResult<String>;
}
