//! Folder navigation and breadcrumbs.

use serde::Serialize;
use tracing::debug;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::{EntryId, FileEntry};
use drive_gateway::MutationGateway;

/// One step of the path from the root to the open folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Folder identifier.
    pub id: EntryId,
    /// Folder name at the time it was opened.
    pub name: String,
}

/// Owns the breadcrumb stack; the current folder is always its last element.
///
/// Keeping only the stack means the current folder id can never disagree
/// with the breadcrumbs: an empty stack is the root.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    breadcrumbs: Vec<Breadcrumb>,
}

impl NavigationController {
    /// Start at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently open folder, `None` at the root.
    pub fn current_folder_id(&self) -> Option<EntryId> {
        self.breadcrumbs.last().map(|crumb| crumb.id)
    }

    /// Breadcrumbs from the root (exclusive) to the open folder.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// Ids of every folder from the root down to the open one.
    pub fn lineage(&self) -> Vec<EntryId> {
        self.breadcrumbs.iter().map(|crumb| crumb.id).collect()
    }

    /// `/`-joined names of the open folder, `/` at the root.
    pub fn display_path(&self) -> String {
        let names: Vec<&str> = self.breadcrumbs.iter().map(|c| c.name.as_str()).collect();
        format!("/{}", names.join("/"))
    }

    /// Descend into `entry`. Files are rejected without changing state.
    pub fn open_folder(&mut self, entry: &FileEntry) -> AppResult<()> {
        if !entry.is_folder {
            return Err(AppError::validation(format!(
                "\"{}\" is not a folder",
                entry.name
            )));
        }
        self.breadcrumbs.push(Breadcrumb {
            id: entry.id,
            name: entry.name.clone(),
        });
        debug!(folder_id = %entry.id, depth = self.breadcrumbs.len(), "Opened folder");
        Ok(())
    }

    /// Jump to a breadcrumb. `-1` is the root; other indices keep the stack
    /// up to and including that crumb. Returns `false`, leaving the stack
    /// untouched, for out-of-range indices.
    pub fn navigate_to_breadcrumb(&mut self, index: isize) -> bool {
        if index == -1 {
            self.navigate_to_root();
            return true;
        }
        match usize::try_from(index) {
            Ok(index) if index < self.breadcrumbs.len() => {
                self.breadcrumbs.truncate(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Go back to the root.
    pub fn navigate_to_root(&mut self) {
        self.breadcrumbs.clear();
    }

    /// Go up one level. Returns `false` at the root.
    pub fn navigate_up(&mut self) -> bool {
        let depth = self.breadcrumbs.len() as isize;
        depth > 0 && self.navigate_to_breadcrumb(depth - 2)
    }

    /// Fetch the listing of the open folder. Errors are returned as-is;
    /// nothing is cached or retried here.
    pub async fn refresh(&self, gateway: &dyn MutationGateway) -> AppResult<Vec<FileEntry>> {
        gateway.list(self.current_folder_id()).await
    }
}
