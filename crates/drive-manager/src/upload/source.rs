//! Dropped items and the directory-reading interface behind them.

use std::fmt;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::debug;

use drive_core::result::AppResult;
use drive_entity::EntryId;
use drive_gateway::Blob;

use super::UploadTask;

/// A top-level or nested item of a drop.
#[derive(Debug)]
pub enum DroppedItem {
    /// A plain file.
    File { name: String, blob: Blob },
    /// A directory whose children are read lazily.
    Directory(Box<dyn DirectoryHandle>),
}

impl DroppedItem {
    pub fn file(name: impl Into<String>, blob: impl Into<Blob>) -> Self {
        Self::File {
            name: name.into(),
            blob: blob.into(),
        }
    }

    pub fn directory(handle: impl DirectoryHandle) -> Self {
        Self::Directory(Box::new(handle))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Directory(handle) => handle.name(),
        }
    }
}

/// A directory in a drop.
pub trait DirectoryHandle: Send + Sync + fmt::Debug + 'static {
    /// Directory name, used as a path segment.
    fn name(&self) -> &str;

    /// Start reading the directory's children.
    fn reader(&self) -> Box<dyn DirectoryReader>;
}

/// Paged access to a directory's children.
#[async_trait]
pub trait DirectoryReader: Send {
    /// Next page of children. A page may be partial; an empty page means
    /// the directory is exhausted.
    async fn read_entries(&mut self) -> AppResult<Vec<DroppedItem>>;
}

/// Read every page of a directory.
pub async fn read_all_entries(handle: &dyn DirectoryHandle) -> AppResult<Vec<DroppedItem>> {
    let mut reader = handle.reader();
    let mut children = Vec::new();
    loop {
        let page = reader.read_entries().await?;
        if page.is_empty() {
            break;
        }
        children.extend(page);
    }
    debug!(directory = handle.name(), children = children.len(), "Read directory");
    Ok(children)
}

/// Flatten dropped items into tasks, depth first. Each directory is read to
/// exhaustion before any child is descended into. Empty directories yield
/// nothing.
pub async fn flatten(
    items: Vec<DroppedItem>,
    target_parent_id: Option<EntryId>,
) -> AppResult<Vec<UploadTask>> {
    let mut tasks = Vec::new();
    for item in items {
        visit(item, String::new(), target_parent_id, &mut tasks).await?;
    }
    Ok(tasks)
}

fn visit<'a>(
    item: DroppedItem,
    prefix: String,
    target_parent_id: Option<EntryId>,
    tasks: &'a mut Vec<UploadTask>,
) -> BoxFuture<'a, AppResult<()>> {
    async move {
        match item {
            DroppedItem::File { name, blob } => tasks.push(UploadTask {
                blob,
                relative_path: format!("{prefix}{name}"),
                target_parent_id,
            }),
            DroppedItem::Directory(handle) => {
                let children = read_all_entries(handle.as_ref()).await?;
                let prefix = format!("{prefix}{}/", handle.name());
                for child in children {
                    visit(child, prefix.clone(), target_parent_id, tasks).await?;
                }
            }
        }
        Ok(())
    }
    .boxed()
}
