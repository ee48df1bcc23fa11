//! # drive-manager
//!
//! Client-side file-manager controllers. Each controller owns one optional
//! slot of UI state (breadcrumbs, clipboard, drag session, context menu,
//! rename draft) and is the only writer of it. [`FileManager`] wires them
//! to a [`drive_gateway::MutationGateway`] and re-lists the current folder
//! after every successful mutation.

pub mod clipboard;
pub mod drag;
pub mod manager;
pub mod menu;
pub mod navigation;
pub mod notice;
pub mod rename;
pub mod upload;

pub use clipboard::{ClipboardController, ClipboardMode, ClipboardSlot};
pub use drag::{DragMoveSession, DropFeedback, RowDragMoveController};
pub use manager::{Activation, DispatchOutcome, FileManager};
pub use menu::{ContextMenuController, ContextMenuState, MenuAction, MenuItem};
pub use navigation::{Breadcrumb, NavigationController};
pub use notice::{Notice, NoticeLevel};
pub use rename::{RenameController, RenameDraft};
pub use upload::{DroppedItem, SelectedFile, UploadBatchResult, UploadIngestor, UploadTask};
