//! In-memory gateway.
//!
//! Behaves like the file store: uploads recreate `/`-separated folders,
//! deletes cascade, moves refuse to put a folder inside itself. Every call
//! is counted per [`GatewayOp`], and rules can make calls fail or stall.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::{EntryId, FileEntry};

use crate::gateway::{Blob, ByteStream, GatewayOp, MutationGateway};

/// Largest file the store agrees to preview.
pub const MAX_PREVIEW_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
struct StoredEntry {
    entry: FileEntry,
    content: Bytes,
}

#[derive(Debug, Clone)]
enum RuleAction {
    Fail(String),
    Delay(Duration),
}

#[derive(Debug, Clone)]
struct Rule {
    /// Matches the upload file name or the target entry name; `None` matches all.
    name: Option<String>,
    action: RuleAction,
    /// Remaining activations; `None` means unlimited.
    remaining: Option<usize>,
}

/// Gateway keeping the whole store in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    entries: Arc<DashMap<EntryId, StoredEntry>>,
    next_id: Arc<AtomicI64>,
    calls: Arc<DashMap<GatewayOp, usize>>,
    rules: Arc<DashMap<GatewayOp, Vec<Rule>>>,
}

impl MemoryGateway {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a folder directly, without counting a call.
    pub fn seed_folder(&self, name: &str, parent_id: Option<EntryId>) -> FileEntry {
        let entry = FileEntry::folder(self.allocate_id(), name, parent_id);
        self.insert(entry, Bytes::new())
    }

    /// Insert a file directly, without counting a call.
    pub fn seed_file(&self, name: &str, content: &str, parent_id: Option<EntryId>) -> FileEntry {
        let content = Bytes::from(content.to_string());
        let mime = mime_guess::from_path(name).first_or_octet_stream().to_string();
        let entry = FileEntry::file(
            self.allocate_id(),
            name,
            Some(mime),
            content.len() as u64,
            parent_id,
        );
        self.insert(entry, content)
    }

    /// Make every call of `op` fail with `message`.
    pub fn fail(&self, op: GatewayOp, message: &str) {
        self.add_rule(op, None, RuleAction::Fail(message.to_string()), None);
    }

    /// Make the next call of `op` fail with `message`.
    pub fn fail_once(&self, op: GatewayOp, message: &str) {
        self.add_rule(op, None, RuleAction::Fail(message.to_string()), Some(1));
    }

    /// Make calls of `op` on the named file or entry fail with `message`.
    pub fn fail_named(&self, op: GatewayOp, name: &str, message: &str) {
        self.add_rule(
            op,
            Some(name.to_string()),
            RuleAction::Fail(message.to_string()),
            None,
        );
    }

    /// Stall calls of `op` on the named file or entry for `delay`.
    pub fn delay_named(&self, op: GatewayOp, name: &str, delay: Duration) {
        self.add_rule(op, Some(name.to_string()), RuleAction::Delay(delay), None);
    }

    /// Remove every failure and delay rule.
    pub fn clear_rules(&self) {
        self.rules.clear();
    }

    /// Number of calls made for `op`, including failed ones.
    pub fn calls(&self, op: GatewayOp) -> usize {
        self.calls.get(&op).map(|count| *count).unwrap_or(0)
    }

    /// Number of calls made across all operations.
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|count| *count.value()).sum()
    }

    /// Snapshot of an entry.
    pub fn entry(&self, id: EntryId) -> Option<FileEntry> {
        self.entries
            .contains_key(&id)
            .then(|| self.snapshot(id))
    }

    /// Find an entry by name below `parent_id`.
    pub fn find(&self, name: &str, parent_id: Option<EntryId>) -> Option<FileEntry> {
        self.child_named(name, parent_id).map(|id| self.snapshot(id))
    }

    /// Stored content of a file.
    pub fn content(&self, id: EntryId) -> Option<Bytes> {
        self.entries.get(&id).map(|stored| stored.content.clone())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn allocate_id(&self) -> EntryId {
        EntryId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn insert(&self, mut entry: FileEntry, content: Bytes) -> FileEntry {
        entry.created_at = Some(chrono::Utc::now().naive_utc());
        let id = entry.id;
        self.entries.insert(id, StoredEntry { entry, content });
        self.snapshot(id)
    }

    fn add_rule(
        &self,
        op: GatewayOp,
        name: Option<String>,
        action: RuleAction,
        remaining: Option<usize>,
    ) {
        self.rules.entry(op).or_default().push(Rule {
            name,
            action,
            remaining,
        });
    }

    /// Count the call and apply the first matching rule.
    async fn enter(&self, op: GatewayOp, name: Option<&str>) -> AppResult<()> {
        *self.calls.entry(op).or_insert(0) += 1;

        let action = self.rules.get_mut(&op).and_then(|mut rules| {
            let position = rules.iter().position(|rule| {
                rule.remaining != Some(0)
                    && rule.name.as_deref().is_none_or(|wanted| Some(wanted) == name)
            })?;
            let rule = &mut rules[position];
            if let Some(remaining) = rule.remaining.as_mut() {
                *remaining -= 1;
            }
            Some(rule.action.clone())
        });

        match action {
            Some(RuleAction::Fail(message)) => Err(AppError::gateway(message)),
            Some(RuleAction::Delay(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn entry_name(&self, id: EntryId) -> Option<String> {
        self.entries.get(&id).map(|stored| stored.entry.name.clone())
    }

    fn snapshot(&self, id: EntryId) -> FileEntry {
        let mut entry = self
            .entries
            .get(&id)
            .map(|stored| stored.entry.clone())
            .unwrap_or_else(|| FileEntry::folder(id, "", None));
        entry.path = Some(self.path_of(id));
        entry
    }

    fn path_of(&self, id: EntryId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.entries.get(&current) {
                Some(stored) => {
                    segments.push(stored.entry.name.clone());
                    cursor = stored.entry.parent_id;
                }
                None => break,
            }
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    fn require_folder(&self, parent_id: Option<EntryId>) -> AppResult<()> {
        match parent_id {
            None => Ok(()),
            Some(id) => match self.entries.get(&id) {
                Some(stored) if stored.entry.is_folder => Ok(()),
                Some(_) => Err(AppError::gateway(format!("Entry {id} is not a folder"))),
                None => Err(AppError::gateway(format!("Folder {id} not found"))),
            },
        }
    }

    fn child_named(&self, name: &str, parent_id: Option<EntryId>) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|stored| stored.entry.parent_id == parent_id && stored.entry.name == name)
            .map(|stored| *stored.key())
    }

    fn is_descendant(&self, candidate: EntryId, ancestor: EntryId) -> bool {
        let mut cursor = self.entries.get(&candidate).and_then(|s| s.entry.parent_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.entries.get(&current).and_then(|s| s.entry.parent_id);
        }
        false
    }

    fn ensure_folder(&self, name: &str, parent_id: Option<EntryId>) -> EntryId {
        if let Some(existing) = self.child_named(name, parent_id) {
            if self.entries.get(&existing).is_some_and(|s| s.entry.is_folder) {
                return existing;
            }
        }
        self.seed_folder(name, parent_id).id
    }

    fn remove_tree(&self, id: EntryId) {
        let children: Vec<EntryId> = self
            .entries
            .iter()
            .filter(|stored| stored.entry.parent_id == Some(id))
            .map(|stored| *stored.key())
            .collect();
        for child in children {
            self.remove_tree(child);
        }
        self.entries.remove(&id);
    }
}

#[async_trait]
impl MutationGateway for MemoryGateway {
    async fn list(&self, parent_id: Option<EntryId>) -> AppResult<Vec<FileEntry>> {
        self.enter(GatewayOp::List, None).await?;
        self.require_folder(parent_id)?;

        let mut ids: Vec<(bool, EntryId)> = self
            .entries
            .iter()
            .filter(|stored| stored.entry.parent_id == parent_id)
            .map(|stored| (stored.entry.is_folder, *stored.key()))
            .collect();
        // Folders first, newest first.
        ids.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        Ok(ids.into_iter().map(|(_, id)| self.snapshot(id)).collect())
    }

    async fn upload(
        &self,
        blob: Blob,
        filename: &str,
        parent_id: Option<EntryId>,
    ) -> AppResult<FileEntry> {
        self.enter(GatewayOp::Upload, Some(filename)).await?;
        self.require_folder(parent_id)?;

        let normalized = filename.replace('\\', "/");
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, folders)) = segments.split_last() else {
            return Err(AppError::gateway("File name cannot be empty"));
        };

        let content = blob.read_all().await?;
        let mut parent = parent_id;
        for folder in folders {
            parent = Some(self.ensure_folder(folder, parent));
        }

        let mime = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        let existing = self
            .child_named(file_name, parent)
            .filter(|id| self.entries.get(id).is_some_and(|s| !s.entry.is_folder));
        let id = existing.unwrap_or_else(|| self.allocate_id());

        debug!(filename, entry_id = %id, replaced = existing.is_some(), "Stored upload");
        let entry = FileEntry::file(id, *file_name, Some(mime), content.len() as u64, parent);
        Ok(self.insert(entry, content))
    }

    async fn download(&self, id: EntryId) -> AppResult<ByteStream> {
        let name = self.entry_name(id);
        self.enter(GatewayOp::Download, name.as_deref()).await?;

        let content = match self.entries.get(&id) {
            Some(stored) if !stored.entry.is_folder => stored.content.clone(),
            Some(_) => return Err(AppError::gateway("Folders cannot be downloaded")),
            None => return Err(AppError::gateway("File not found")),
        };
        Ok(Box::pin(futures::stream::iter(vec![Ok::<_, std::io::Error>(content)])))
    }

    async fn delete(&self, id: EntryId) -> AppResult<()> {
        let name = self.entry_name(id);
        self.enter(GatewayOp::Delete, name.as_deref()).await?;
        if !self.entries.contains_key(&id) {
            return Err(AppError::gateway("File not found"));
        }
        self.remove_tree(id);
        Ok(())
    }

    async fn create_folder(&self, name: &str, parent_id: Option<EntryId>) -> AppResult<FileEntry> {
        self.enter(GatewayOp::CreateFolder, Some(name)).await?;
        if name.trim().is_empty() {
            return Err(AppError::gateway("Folder name cannot be empty"));
        }
        self.require_folder(parent_id)?;
        Ok(self.seed_folder(name, parent_id))
    }

    async fn rename(&self, id: EntryId, new_name: &str) -> AppResult<FileEntry> {
        let name = self.entry_name(id);
        self.enter(GatewayOp::Rename, name.as_deref()).await?;
        if new_name.trim().is_empty() {
            return Err(AppError::gateway("New name cannot be empty"));
        }
        let Some(mut stored) = self.entries.get_mut(&id) else {
            return Err(AppError::gateway("File not found"));
        };
        stored.entry.name = new_name.to_string();
        drop(stored);
        Ok(self.snapshot(id))
    }

    async fn move_entry(
        &self,
        id: EntryId,
        target_parent_id: Option<EntryId>,
    ) -> AppResult<FileEntry> {
        let name = self.entry_name(id);
        self.enter(GatewayOp::Move, name.as_deref()).await?;
        if !self.entries.contains_key(&id) {
            return Err(AppError::gateway("File not found"));
        }
        self.require_folder(target_parent_id)?;
        if let Some(target) = target_parent_id {
            if target == id || self.is_descendant(target, id) {
                return Err(AppError::gateway(
                    "Cannot move a folder into itself or one of its subfolders",
                ));
            }
        }
        if let Some(mut stored) = self.entries.get_mut(&id) {
            stored.entry.parent_id = target_parent_id;
        }
        Ok(self.snapshot(id))
    }

    async fn preview(&self, id: EntryId) -> AppResult<String> {
        let name = self.entry_name(id);
        self.enter(GatewayOp::Preview, name.as_deref()).await?;
        let content = match self.entries.get(&id) {
            Some(stored) if !stored.entry.is_folder => stored.content.clone(),
            _ => return Err(AppError::gateway("File does not exist or cannot be read")),
        };
        if content.len() > MAX_PREVIEW_BYTES {
            return Err(AppError::gateway("File is too large to preview"));
        }
        Ok(String::from_utf8_lossy(&content).into_owned())
    }
}
