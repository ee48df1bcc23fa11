//! Local filesystem as a drop source.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_gateway::Blob;

use super::source::{DirectoryHandle, DirectoryReader, DroppedItem};

/// Turn a local path into a dropped item. Files are streamed from disk at
/// upload time; directories are read lazily in pages of `page_size`.
pub async fn dropped_from_path(path: &Path, page_size: usize) -> AppResult<DroppedItem> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        AppError::with_source(ErrorKind::Io, format!("Cannot read {}", path.display()), e)
    })?;
    let name = file_name(path)?;

    if metadata.is_dir() {
        let canonical = canonicalize(path).await?;
        Ok(DroppedItem::directory(LocalDirectory {
            path: path.to_path_buf(),
            name,
            page_size: page_size.max(1),
            lineage: vec![canonical],
        }))
    } else {
        Ok(DroppedItem::file(name, Blob::File(path.to_path_buf())))
    }
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    path: PathBuf,
    name: String,
    page_size: usize,
    /// Canonical paths from the dropped root down to this directory.
    lineage: Vec<PathBuf>,
}

impl DirectoryHandle for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(LocalReader {
            dir: self.clone(),
            pending: None,
        })
    }
}

struct LocalReader {
    dir: LocalDirectory,
    /// Children not yet handed out, sorted by name. Filled on first read.
    pending: Option<VecDeque<DroppedItem>>,
}

impl LocalReader {
    async fn scan(&self) -> AppResult<VecDeque<DroppedItem>> {
        let path = &self.dir.path;
        let mut read_dir = tokio::fs::read_dir(path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Io, format!("Cannot read {}", path.display()), e)
        })?;

        let mut children = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let child = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks; anything that is neither file nor directory is skipped.
            let metadata = match tokio::fs::metadata(&child).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    debug!(path = %child.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if metadata.is_file() {
                let item = DroppedItem::file(name.clone(), Blob::File(child));
                children.push((name, item));
            } else if metadata.is_dir() {
                let canonical = canonicalize(&child).await?;
                // A symlink back to an ancestor would recurse forever.
                if self.dir.lineage.contains(&canonical) {
                    debug!(path = %child.display(), "Skipping directory cycle");
                    continue;
                }
                let mut lineage = self.dir.lineage.clone();
                lineage.push(canonical);
                let dir = LocalDirectory {
                    path: child,
                    name: name.clone(),
                    page_size: self.dir.page_size,
                    lineage,
                };
                children.push((name, DroppedItem::directory(dir)));
            }
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(children.into_iter().map(|(_, item)| item).collect())
    }
}

#[async_trait]
impl DirectoryReader for LocalReader {
    async fn read_entries(&mut self) -> AppResult<Vec<DroppedItem>> {
        if self.pending.is_none() {
            self.pending = Some(self.scan().await?);
        }
        let page_size = self.dir.page_size;
        Ok(self
            .pending
            .as_mut()
            .map(|pending| {
                let take = page_size.min(pending.len());
                pending.drain(..take).collect()
            })
            .unwrap_or_default())
    }
}

async fn canonicalize(path: &Path) -> AppResult<PathBuf> {
    tokio::fs::canonicalize(path).await.map_err(|e| {
        AppError::with_source(ErrorKind::Io, format!("Cannot resolve {}", path.display()), e)
    })
}

fn file_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("{} has no file name", path.display())))
}
