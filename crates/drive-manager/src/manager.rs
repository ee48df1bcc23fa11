//! The file-manager facade.
//!
//! [`FileManager`] owns every controller, the current listing and the last
//! [`Notice`]. Every operation sets the notice; every successful mutation is
//! followed by exactly one re-listing of the open folder. Failed mutations
//! never trigger a re-listing. A re-listing that fails after a mutation is
//! logged and leaves the previous listing in place; the mutation still
//! reports its own result.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use drive_core::config::upload::UploadConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::file::is_previewable;
use drive_entity::{EntryId, FileEntry};
use drive_gateway::{ByteStream, MutationGateway};

use crate::clipboard::ClipboardController;
use crate::drag::{DropFeedback, RowDragMoveController};
use crate::menu::{ContextMenuController, MenuAction, MenuItem};
use crate::navigation::{Breadcrumb, NavigationController};
use crate::notice::Notice;
use crate::rename::RenameController;
use crate::upload::{DroppedItem, SelectedFile, UploadBatchResult, UploadIngestor, UploadTask};

/// Result of activating (double-clicking) an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A folder was opened and listed.
    Opened,
    /// A file's text content.
    Preview(String),
}

/// Result of a context-menu action.
pub enum DispatchOutcome {
    Copied(FileEntry),
    Cut(FileEntry),
    Pasted(FileEntry),
    RenameStarted(FileEntry),
    Deleted(FileEntry),
    Downloaded { entry: FileEntry, stream: ByteStream },
}

impl fmt::Debug for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copied(entry) => f.debug_tuple("Copied").field(entry).finish(),
            Self::Cut(entry) => f.debug_tuple("Cut").field(entry).finish(),
            Self::Pasted(entry) => f.debug_tuple("Pasted").field(entry).finish(),
            Self::RenameStarted(entry) => f.debug_tuple("RenameStarted").field(entry).finish(),
            Self::Deleted(entry) => f.debug_tuple("Deleted").field(entry).finish(),
            Self::Downloaded { entry, .. } => f
                .debug_struct("Downloaded")
                .field("entry", entry)
                .finish_non_exhaustive(),
        }
    }
}

/// Client-side file manager over a [`MutationGateway`].
#[derive(Debug)]
pub struct FileManager {
    gateway: Arc<dyn MutationGateway>,
    navigation: NavigationController,
    clipboard: ClipboardController,
    uploads: UploadIngestor,
    drag: RowDragMoveController,
    menu: ContextMenuController,
    rename: RenameController,
    entries: Vec<FileEntry>,
    notice: Option<Notice>,
}

impl FileManager {
    /// Create a manager at the root. Call [`FileManager::refresh`] to load
    /// the first listing.
    pub fn new(gateway: Arc<dyn MutationGateway>, upload: UploadConfig) -> Self {
        Self {
            gateway,
            navigation: NavigationController::new(),
            clipboard: ClipboardController::new(),
            uploads: UploadIngestor::new(upload),
            drag: RowDragMoveController::new(),
            menu: ContextMenuController::new(),
            rename: RenameController::new(),
            entries: Vec::new(),
            notice: None,
        }
    }

    pub fn gateway(&self) -> &Arc<dyn MutationGateway> {
        &self.gateway
    }

    /// Listing of the open folder as of the last refresh.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Entry of the current listing with the given name.
    pub fn find(&self, name: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entry(&self, id: EntryId) -> Option<&FileEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Take the notice, leaving none.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn clipboard(&self) -> &ClipboardController {
        &self.clipboard
    }

    pub fn drag(&self) -> &RowDragMoveController {
        &self.drag
    }

    pub fn menu(&self) -> &ContextMenuController {
        &self.menu
    }

    pub fn rename(&self) -> &RenameController {
        &self.rename
    }

    pub fn current_folder_id(&self) -> Option<EntryId> {
        self.navigation.current_folder_id()
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        self.navigation.breadcrumbs()
    }

    // --- Navigation ---

    /// Re-list the open folder.
    pub async fn refresh(&mut self) -> AppResult<()> {
        match self.navigation.refresh(self.gateway.as_ref()).await {
            Ok(entries) => {
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load files");
                self.notice = Some(Notice::failure("Failed to load files", &e));
                Err(e)
            }
        }
    }

    /// Re-list after a successful mutation. The listing is kept stale on
    /// failure so the mutation's outcome and notice survive.
    async fn refresh_after(&mut self) {
        match self.navigation.refresh(self.gateway.as_ref()).await {
            Ok(entries) => self.entries = entries,
            Err(e) => warn!(error = %e, "Failed to reload files after change"),
        }
    }

    /// Descend into a folder and list it.
    pub async fn open_folder(&mut self, entry: &FileEntry) -> AppResult<()> {
        if let Err(e) = self.navigation.open_folder(entry) {
            return Err(self.fail("Open failed", e));
        }
        self.refresh().await
    }

    /// Jump to a breadcrumb (`-1` = root) and list it. Returns `false` for
    /// an out-of-range index, without listing.
    pub async fn navigate_to_breadcrumb(&mut self, index: isize) -> AppResult<bool> {
        if !self.navigation.navigate_to_breadcrumb(index) {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// Open a folder or preview a file.
    pub async fn activate(&mut self, entry: &FileEntry) -> AppResult<Activation> {
        if entry.is_folder {
            self.open_folder(entry).await?;
            Ok(Activation::Opened)
        } else {
            self.preview(entry).await.map(Activation::Preview)
        }
    }

    // --- Clipboard ---

    pub fn copy(&mut self, entry: &FileEntry) {
        let name = self.clipboard.copy(entry);
        self.notice = Some(Notice::success(format!("Copied \"{name}\"")));
    }

    pub fn cut(&mut self, entry: &FileEntry) {
        let name = self.clipboard.cut(entry);
        self.notice = Some(Notice::success(format!("Cut \"{name}\"")));
    }

    /// Paste into the open folder.
    pub async fn paste(&mut self) -> AppResult<FileEntry> {
        let target = self.navigation.current_folder_id();
        let lineage = self.navigation.lineage();
        let result = self
            .clipboard
            .paste(self.gateway.as_ref(), target, &lineage)
            .await;

        match result {
            Ok(moved) => {
                self.notice = Some(Notice::success(format!("Moved \"{}\"", moved.name)));
                self.refresh_after().await;
                Ok(moved)
            }
            Err(e) => Err(self.fail("Paste failed", e)),
        }
    }

    // --- Uploads ---

    /// Upload files picked in a chooser into the open folder.
    pub async fn upload_selection(
        &mut self,
        files: Vec<SelectedFile>,
    ) -> AppResult<UploadBatchResult> {
        let tasks = UploadIngestor::from_selection(files, self.current_folder_id());
        self.run_batch(tasks).await
    }

    /// Upload a drop into the open folder, keeping its directory structure.
    pub async fn upload_drop(
        &mut self,
        items: Vec<DroppedItem>,
    ) -> AppResult<UploadBatchResult> {
        let tasks = match UploadIngestor::from_drop(items, self.current_folder_id()).await {
            Ok(tasks) => tasks,
            Err(e) => return Err(self.fail("Upload failed", e)),
        };
        self.run_batch(tasks).await
    }

    async fn run_batch(&mut self, tasks: Vec<UploadTask>) -> AppResult<UploadBatchResult> {
        if tasks.is_empty() {
            return Ok(UploadBatchResult::default());
        }

        let result = self.uploads.submit(self.gateway.as_ref(), tasks).await;
        self.notice = Some(if result.all_succeeded() {
            Notice::success(format!("Uploaded {} file(s)", result.success_count))
        } else {
            Notice::error(format!(
                "Uploaded {} file(s), {} failed",
                result.success_count, result.failure_count
            ))
        });
        self.refresh_after().await;
        Ok(result)
    }

    // --- Drag-move ---

    pub fn drag_start(&mut self, entry: &FileEntry) {
        self.drag.drag_start(entry);
    }

    pub fn drag_over(&mut self, candidate: &FileEntry) -> DropFeedback {
        self.drag.drag_over(candidate)
    }

    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    /// Drop the dragged entry on `target`.
    pub async fn drop_on(&mut self, target: &FileEntry) -> AppResult<FileEntry> {
        match self.drag.drop(self.gateway.as_ref(), target).await {
            Ok(moved) => {
                self.notice = Some(Notice::success(format!(
                    "Moved \"{}\" to \"{}\"",
                    moved.name, target.name
                )));
                self.refresh_after().await;
                Ok(moved)
            }
            Err(e) => Err(self.fail("Move failed", e)),
        }
    }

    // --- Context menu ---

    pub fn open_menu(&mut self, x: i32, y: i32, target: Option<&FileEntry>) {
        self.menu.open(x, y, target);
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
    }

    /// Items of the open menu.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.menu.items(!self.clipboard.is_empty())
    }

    /// Run a menu action against the menu's target. The menu is closed
    /// first, whatever the outcome.
    pub async fn dispatch(&mut self, action: MenuAction) -> AppResult<DispatchOutcome> {
        let target = match self
            .menu
            .take_for_dispatch(action, !self.clipboard.is_empty())
        {
            Ok(target) => target,
            Err(e) => return Err(self.fail("Action failed", e)),
        };

        match (action, target) {
            (MenuAction::Paste, _) => self.paste().await.map(DispatchOutcome::Pasted),
            (MenuAction::Copy, Some(entry)) => {
                self.copy(&entry);
                Ok(DispatchOutcome::Copied(entry))
            }
            (MenuAction::Cut, Some(entry)) => {
                self.cut(&entry);
                Ok(DispatchOutcome::Cut(entry))
            }
            (MenuAction::Rename, Some(entry)) => {
                self.begin_rename(&entry);
                Ok(DispatchOutcome::RenameStarted(entry))
            }
            (MenuAction::Delete, Some(entry)) => {
                self.delete(&entry).await?;
                Ok(DispatchOutcome::Deleted(entry))
            }
            (MenuAction::Download, Some(entry)) => {
                let stream = self.download(&entry).await?;
                Ok(DispatchOutcome::Downloaded { entry, stream })
            }
            (action, None) => Err(self.fail(
                "Action failed",
                AppError::validation(format!("{action} needs a target")),
            )),
        }
    }

    // --- Rename ---

    pub fn begin_rename(&mut self, entry: &FileEntry) {
        self.rename.begin(entry);
    }

    pub fn set_rename_draft(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.rename.set_draft(name)
    }

    pub fn cancel_rename(&mut self) {
        self.rename.cancel();
    }

    /// Submit the rename draft.
    pub async fn commit_rename(&mut self) -> AppResult<FileEntry> {
        match self.rename.commit(self.gateway.as_ref()).await {
            Ok(renamed) => {
                self.notice = Some(Notice::success(format!("Renamed to \"{}\"", renamed.name)));
                self.refresh_after().await;
                Ok(renamed)
            }
            Err(e) => Err(self.fail("Rename failed", e)),
        }
    }

    /// Shorthand for begin, set draft and commit.
    pub async fn rename_entry(
        &mut self,
        entry: &FileEntry,
        new_name: &str,
    ) -> AppResult<FileEntry> {
        self.begin_rename(entry);
        self.set_rename_draft(new_name)?;
        self.commit_rename().await
    }

    // --- Other operations ---

    /// Create a folder in the open folder.
    pub async fn create_folder(&mut self, name: &str) -> AppResult<FileEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.fail(
                "Create folder failed",
                AppError::empty_name("Folder name cannot be empty"),
            ));
        }

        let parent = self.current_folder_id();
        match self.gateway.create_folder(name, parent).await {
            Ok(folder) => {
                info!(folder_id = %folder.id, name, "Created folder");
                self.notice = Some(Notice::success(format!("Created folder \"{}\"", folder.name)));
                self.refresh_after().await;
                Ok(folder)
            }
            Err(e) => Err(self.fail("Create folder failed", e)),
        }
    }

    /// Delete an entry. Confirmation is up to the caller.
    pub async fn delete(&mut self, entry: &FileEntry) -> AppResult<()> {
        match self.gateway.delete(entry.id).await {
            Ok(()) => {
                info!(entry_id = %entry.id, "Deleted entry");
                self.notice = Some(Notice::success(format!("Deleted \"{}\"", entry.name)));
                self.refresh_after().await;
                Ok(())
            }
            Err(e) => Err(self.fail("Delete failed", e)),
        }
    }

    /// Start downloading a file. The caller drains the stream.
    pub async fn download(&mut self, entry: &FileEntry) -> AppResult<ByteStream> {
        if entry.is_folder {
            return Err(self.fail(
                "Download failed",
                AppError::validation("Folders cannot be downloaded"),
            ));
        }
        match self.gateway.download(entry.id).await {
            Ok(stream) => {
                self.notice = Some(Notice::success(format!("Downloading \"{}\"", entry.name)));
                Ok(stream)
            }
            Err(e) => Err(self.fail("Download failed", e)),
        }
    }

    /// Fetch the text of a previewable file.
    pub async fn preview(&mut self, entry: &FileEntry) -> AppResult<String> {
        if !is_previewable(entry) {
            return Err(self.fail(
                "Preview failed",
                AppError::not_previewable(format!(
                    "Preview is not available for \"{}\"",
                    entry.name
                )),
            ));
        }
        match self.gateway.preview(entry.id).await {
            Ok(text) => {
                self.notice = Some(Notice::success(format!("Previewing \"{}\"", entry.name)));
                Ok(text)
            }
            Err(e) => Err(self.fail("Preview failed", e)),
        }
    }

    fn fail(&mut self, context: &str, err: AppError) -> AppError {
        if err.is_gateway() {
            warn!(error = %err, "{context}");
        }
        self.notice = Some(Notice::failure(context, &err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_core::error::ErrorKind;
    use drive_gateway::{GatewayOp, MemoryGateway};
    use futures::TryStreamExt;

    use crate::notice::NoticeLevel;
    use crate::upload::memory::MemoryDirectory;

    async fn manager_with(gateway: &MemoryGateway) -> FileManager {
        let mut manager = FileManager::new(Arc::new(gateway.clone()), UploadConfig::default());
        manager.refresh().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_open_folder_and_breadcrumbs() {
        let gateway = MemoryGateway::new();
        let docs = gateway.seed_folder("docs", None);
        gateway.seed_file("readme.md", "# hi", Some(docs.id));

        let mut manager = manager_with(&gateway).await;
        manager.open_folder(&docs).await.unwrap();
        assert_eq!(manager.current_folder_id(), Some(docs.id));
        assert_eq!(manager.entries().len(), 1);

        assert!(manager.navigate_to_breadcrumb(-1).await.unwrap());
        assert_eq!(manager.current_folder_id(), None);
        assert!(!manager.navigate_to_breadcrumb(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_with_failures_refreshes_once() {
        let gateway = MemoryGateway::new();
        gateway.fail_named(GatewayOp::Upload, "f2.txt", "rejected");
        gateway.fail_named(GatewayOp::Upload, "f4.txt", "rejected");
        let mut manager = manager_with(&gateway).await;
        let lists_before = gateway.calls(GatewayOp::List);

        let files = (1..=5)
            .map(|i| SelectedFile::new(format!("f{i}.txt"), "data"))
            .collect();
        let result = manager.upload_selection(files).await.unwrap();

        assert_eq!((result.success_count, result.failure_count), (3, 2));
        assert_eq!(gateway.calls(GatewayOp::List) - lists_before, 1);
        assert_eq!(manager.entries().len(), 3);
        let notice = manager.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, "Uploaded 3 file(s), 2 failed");
    }

    #[tokio::test]
    async fn test_empty_selection_is_noop() {
        let gateway = MemoryGateway::new();
        let mut manager = manager_with(&gateway).await;
        let calls_before = gateway.total_calls();

        let result = manager.upload_selection(Vec::new()).await.unwrap();
        assert_eq!(result.attempted(), 0);
        assert_eq!(gateway.total_calls(), calls_before);
    }

    #[tokio::test]
    async fn test_drop_uploads_into_open_folder() {
        let gateway = MemoryGateway::new();
        let dest = gateway.seed_folder("dest", None);
        let mut manager = manager_with(&gateway).await;
        manager.open_folder(&dest).await.unwrap();

        let tree = MemoryDirectory::new("root")
            .with_file("a.txt", "a")
            .with_dir(MemoryDirectory::new("sub").with_file("b.txt", "b").with_file("c.txt", "c"));
        let result = manager
            .upload_drop(vec![DroppedItem::directory(tree)])
            .await
            .unwrap();

        assert_eq!(result.success_count, 3);
        assert_eq!(manager.entries().len(), 1);
        assert_eq!(manager.entries()[0].name, "root");
    }

    #[tokio::test]
    async fn test_cut_paste_refreshes_and_clears() {
        let gateway = MemoryGateway::new();
        let dest = gateway.seed_folder("dest", None);
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.cut(&file);
        manager.open_folder(&dest).await.unwrap();
        let lists_before = gateway.calls(GatewayOp::List);
        manager.paste().await.unwrap();

        assert!(manager.clipboard().is_empty());
        assert_eq!(gateway.calls(GatewayOp::List) - lists_before, 1);
        assert_eq!(manager.entries()[0].name, "a.txt");
    }

    #[tokio::test]
    async fn test_failed_paste_no_refresh() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        gateway.fail(GatewayOp::Move, "Storage offline");
        let mut manager = manager_with(&gateway).await;
        let lists_before = gateway.calls(GatewayOp::List);

        manager.cut(&file);
        let err = manager.paste().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Gateway);
        assert_eq!(gateway.calls(GatewayOp::List), lists_before);
        assert!(!manager.clipboard().is_empty());
        assert_eq!(manager.notice().unwrap().text, "Paste failed: Storage offline");
    }

    #[tokio::test]
    async fn test_paste_folder_into_own_child() {
        let gateway = MemoryGateway::new();
        let parent = gateway.seed_folder("parent", None);
        let child = gateway.seed_folder("child", Some(parent.id));
        let mut manager = manager_with(&gateway).await;

        manager.cut(&parent);
        manager.open_folder(&parent).await.unwrap();
        manager.open_folder(&child).await.unwrap();
        let err = manager.paste().await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidDropTarget);
        assert_eq!(gateway.calls(GatewayOp::Move), 0);
    }

    #[tokio::test]
    async fn test_drop_on_invalid_target_no_network() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        let other = gateway.seed_file("b.txt", "b", None);
        let mut manager = manager_with(&gateway).await;
        let calls_before = gateway.total_calls();

        manager.drag_start(&file);
        assert_eq!(manager.drag_over(&other), DropFeedback::Reject);
        let err = manager.drop_on(&other).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidDropTarget);
        assert_eq!(gateway.total_calls(), calls_before);
        assert!(manager.drag().session().is_none());
        assert!(manager.notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_drop_on_folder_moves_and_refreshes() {
        let gateway = MemoryGateway::new();
        let dest = gateway.seed_folder("dest", None);
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.drag_start(&file);
        manager.drag_over(&dest);
        manager.drop_on(&dest).await.unwrap();

        assert_eq!(manager.entries().len(), 1);
        assert_eq!(manager.entries()[0].id, dest.id);
    }

    #[tokio::test]
    async fn test_menu_row_then_canvas() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.open_menu(5, 5, Some(&file));
        assert_eq!(manager.menu_items().len(), 5);
        manager.open_menu(9, 9, None);
        let items = manager.menu_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].action, MenuAction::Paste);
        assert!(!items[0].enabled);
    }

    #[tokio::test]
    async fn test_dispatch_cut_then_paste_on_canvas() {
        let gateway = MemoryGateway::new();
        let dest = gateway.seed_folder("dest", None);
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.open_menu(0, 0, Some(&file));
        let outcome = manager.dispatch(MenuAction::Cut).await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Cut(_)));
        assert!(!manager.menu().is_open());

        manager.open_folder(&dest).await.unwrap();
        manager.open_menu(0, 0, None);
        let outcome = manager.dispatch(MenuAction::Paste).await.unwrap();
        assert!(matches!(outcome, DispatchOutcome::Pasted(ref e) if e.id == file.id));
    }

    #[tokio::test]
    async fn test_dispatch_failure_still_closes_menu() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        gateway.fail(GatewayOp::Delete, "locked");
        let mut manager = manager_with(&gateway).await;

        manager.open_menu(0, 0, Some(&file));
        assert!(manager.dispatch(MenuAction::Delete).await.is_err());
        assert!(!manager.menu().is_open());
        assert_eq!(manager.notice().unwrap().text, "Delete failed: locked");
    }

    #[tokio::test]
    async fn test_dispatch_download_streams_content() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "payload", None);
        let mut manager = manager_with(&gateway).await;

        manager.open_menu(0, 0, Some(&file));
        let DispatchOutcome::Downloaded { stream, .. } =
            manager.dispatch(MenuAction::Download).await.unwrap()
        else {
            panic!("expected a download");
        };
        let chunks: Vec<_> = stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"payload");
    }

    #[tokio::test]
    async fn test_rename_whitespace_no_call() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        let err = manager.rename_entry(&file, "   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyName);
        assert_eq!(gateway.calls(GatewayOp::Rename), 0);
        assert!(manager.rename().draft().is_some());
    }

    #[tokio::test]
    async fn test_rename_success_refreshes() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.rename_entry(&file, " b.txt ").await.unwrap();
        assert!(manager.find("b.txt").is_some());
        assert!(manager.rename().draft().is_none());
    }

    #[tokio::test]
    async fn test_create_folder_blank_name() {
        let gateway = MemoryGateway::new();
        let mut manager = manager_with(&gateway).await;
        let err = manager.create_folder("  ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyName);
        assert_eq!(gateway.calls(GatewayOp::CreateFolder), 0);

        manager.create_folder("reports").await.unwrap();
        assert!(manager.find("reports").is_some());
    }

    #[tokio::test]
    async fn test_preview_non_text_rejected_locally() {
        let gateway = MemoryGateway::new();
        let image = gateway.seed_file("photo.png", "png", None);
        let text = gateway.seed_file("notes.txt", "hello", None);
        let mut manager = manager_with(&gateway).await;

        let err = manager.preview(&image).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotPreviewable);
        assert_eq!(gateway.calls(GatewayOp::Preview), 0);

        let activation = manager.activate(&text).await.unwrap();
        assert_eq!(activation, Activation::Preview("hello".to_string()));
    }

    #[tokio::test]
    async fn test_download_folder_rejected() {
        let gateway = MemoryGateway::new();
        let folder = gateway.seed_folder("docs", None);
        let mut manager = manager_with(&gateway).await;
        let Err(err) = manager.download(&folder).await else {
            panic!("folder download succeeded");
        };
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(gateway.calls(GatewayOp::Download), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_sets_notice() {
        let gateway = MemoryGateway::new();
        let mut manager = FileManager::new(Arc::new(gateway.clone()), UploadConfig::default());
        gateway.fail_once(GatewayOp::List, "Server unavailable");

        assert!(manager.refresh().await.is_err());
        assert_eq!(
            manager.notice().unwrap().text,
            "Failed to load files: Server unavailable"
        );
    }

    #[tokio::test]
    async fn test_upload_reports_batch_when_relisting_fails() {
        let gateway = MemoryGateway::new();
        let mut manager = manager_with(&gateway).await;
        gateway.fail_once(GatewayOp::List, "listing down");

        let result = manager
            .upload_selection(vec![
                SelectedFile::new("a.txt", "a"),
                SelectedFile::new("b.txt", "b"),
            ])
            .await
            .unwrap();

        assert_eq!(result.success_count, 2);
        assert_eq!(gateway.len(), 2);
        assert!(manager.entries().is_empty());
        assert_eq!(manager.notice().unwrap().text, "Uploaded 2 file(s)");
    }

    #[tokio::test]
    async fn test_paste_succeeds_when_relisting_fails() {
        let gateway = MemoryGateway::new();
        let dest = gateway.seed_folder("dest", None);
        let file = gateway.seed_file("a.txt", "a", None);
        let mut manager = manager_with(&gateway).await;

        manager.cut(&file);
        manager.open_folder(&dest).await.unwrap();
        gateway.fail_once(GatewayOp::List, "listing down");
        let moved = manager.paste().await.unwrap();

        assert_eq!(moved.parent_id, Some(dest.id));
        assert!(manager.clipboard().is_empty());
        assert_eq!(manager.notice().unwrap().level, NoticeLevel::Success);

        manager.refresh().await.unwrap();
        assert_eq!(manager.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_relisting_fails() {
        let gateway = MemoryGateway::new();
        let file = gateway.seed_file("old.txt", "x", None);
        let mut manager = manager_with(&gateway).await;
        gateway.fail_once(GatewayOp::List, "listing down");

        manager.delete(&file).await.unwrap();
        assert!(gateway.is_empty());
        assert_eq!(manager.entries().len(), 1);
        assert_eq!(manager.notice().unwrap().text, "Deleted \"old.txt\"");
    }
}
