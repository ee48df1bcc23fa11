//! Drag a row onto a folder row to move it.

use tracing::info;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::{EntryId, FileEntry};
use drive_gateway::MutationGateway;

/// An in-progress row drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragMoveSession {
    /// The entry being dragged.
    pub dragged: FileEntry,
    /// Folder currently highlighted as the drop target.
    pub drop_target: Option<EntryId>,
}

/// Response to hovering over a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropFeedback {
    /// The row is a valid target and is now highlighted.
    Accept(EntryId),
    /// The row cannot receive the dragged entry.
    Reject,
}

/// Row drag-and-drop state. Only folders other than the dragged entry itself
/// accept a drop.
#[derive(Debug, Clone, Default)]
pub struct RowDragMoveController {
    session: Option<DragMoveSession>,
}

impl RowDragMoveController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragMoveSession> {
        self.session.as_ref()
    }

    /// Begin dragging `entry`, replacing any stale session.
    pub fn drag_start(&mut self, entry: &FileEntry) {
        self.session = Some(DragMoveSession {
            dragged: entry.clone(),
            drop_target: None,
        });
    }

    /// Hover over `candidate`.
    pub fn drag_over(&mut self, candidate: &FileEntry) -> DropFeedback {
        let Some(session) = self.session.as_mut() else {
            return DropFeedback::Reject;
        };
        if accepts(&session.dragged, candidate) {
            session.drop_target = Some(candidate.id);
            DropFeedback::Accept(candidate.id)
        } else {
            session.drop_target = None;
            DropFeedback::Reject
        }
    }

    /// The pointer left the highlighted row.
    pub fn drag_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.drop_target = None;
        }
    }

    /// Drop on `target`. The session ends whatever the outcome; an invalid
    /// target is refused without contacting the store.
    pub async fn drop(
        &mut self,
        gateway: &dyn MutationGateway,
        target: &FileEntry,
    ) -> AppResult<FileEntry> {
        let session = self
            .session
            .take()
            .ok_or_else(|| AppError::invalid_drop_target("No drag in progress"))?;

        if !accepts(&session.dragged, target) {
            return Err(AppError::invalid_drop_target(format!(
                "\"{}\" cannot be dropped on \"{}\"",
                session.dragged.name, target.name
            )));
        }

        let moved = gateway.move_entry(session.dragged.id, Some(target.id)).await?;
        info!(entry_id = %moved.id, target = %target.id, "Moved entry by drag");
        Ok(moved)
    }

    /// The drag ended without a drop.
    pub fn drag_end(&mut self) {
        self.session = None;
    }
}

fn accepts(dragged: &FileEntry, candidate: &FileEntry) -> bool {
    candidate.is_folder && candidate.id != dragged.id
}
