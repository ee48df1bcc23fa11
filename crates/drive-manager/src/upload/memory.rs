//! In-memory directory trees, for drops built from data already in hand.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_gateway::Blob;

use super::source::{DirectoryHandle, DirectoryReader, DroppedItem};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
enum Child {
    File(String, Bytes),
    Dir(MemoryDirectory),
}

/// A directory whose children live in memory.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    name: String,
    children: Vec<Child>,
    page_size: usize,
    error: Option<String>,
    reads: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            error: None,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.children.push(Child::File(name.into(), content.into()));
        self
    }

    pub fn with_dir(mut self, dir: MemoryDirectory) -> Self {
        self.children.push(Child::Dir(dir));
        self
    }

    /// Children handed out per `read_entries` call.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every read of this directory fail.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Counter of `read_entries` calls across all readers.
    pub fn read_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

impl DirectoryHandle for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(MemoryReader {
            dir: self.clone(),
            offset: 0,
        })
    }
}

struct MemoryReader {
    dir: MemoryDirectory,
    offset: usize,
}

#[async_trait]
impl DirectoryReader for MemoryReader {
    async fn read_entries(&mut self) -> AppResult<Vec<DroppedItem>> {
        self.dir.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.dir.error {
            return Err(AppError::validation(format!(
                "Cannot read directory \"{}\": {message}",
                self.dir.name
            )));
        }

        let end = (self.offset + self.dir.page_size).min(self.dir.children.len());
        let page = self.dir.children[self.offset..end]
            .iter()
            .map(|child| match child {
                Child::File(name, content) => {
                    DroppedItem::file(name.clone(), Blob::Bytes(content.clone()))
                }
                Child::Dir(dir) => DroppedItem::directory(dir.clone()),
            })
            .collect();
        self.offset = end;
        Ok(page)
    }
}
