//! Single-slot clipboard for cut and copy.

use serde::Serialize;
use tracing::info;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::{EntryId, FileEntry};
use drive_gateway::MutationGateway;

/// What a paste should do with the held entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClipboardMode {
    /// Move the entry to the paste target.
    Cut,
    /// Duplicate the entry. Not supported by the store yet.
    Copy,
}

/// The held entry and its mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipboardSlot {
    /// Snapshot of the entry taken when it was cut or copied.
    pub entry: FileEntry,
    /// Cut or copy.
    pub mode: ClipboardMode,
}

/// Holds at most one entry. A new cut or copy replaces the previous one.
#[derive(Debug, Clone, Default)]
pub struct ClipboardController {
    slot: Option<ClipboardSlot>,
}

impl ClipboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `entry` for copying. Returns its name for the status line.
    pub fn copy(&mut self, entry: &FileEntry) -> String {
        self.hold(entry, ClipboardMode::Copy)
    }

    /// Hold `entry` for moving. Returns its name for the status line.
    pub fn cut(&mut self, entry: &FileEntry) -> String {
        self.hold(entry, ClipboardMode::Cut)
    }

    pub fn slot(&self) -> Option<&ClipboardSlot> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Apply the held entry to `target` (`None` = root).
    ///
    /// `lineage` lists the folder ids from the root down to `target`; a cut
    /// folder found there would end up inside itself and is refused before
    /// any network call. The slot is cleared only after a successful move.
    pub async fn paste(
        &mut self,
        gateway: &dyn MutationGateway,
        target: Option<EntryId>,
        lineage: &[EntryId],
    ) -> AppResult<FileEntry> {
        let slot = self.slot.as_ref().ok_or_else(AppError::empty_clipboard)?;

        match slot.mode {
            ClipboardMode::Copy => Err(AppError::not_implemented(
                "Copy is not supported yet; use cut and paste to move",
            )),
            ClipboardMode::Cut => {
                let entry = &slot.entry;
                if target == Some(entry.id) || lineage.contains(&entry.id) {
                    return Err(AppError::invalid_drop_target(format!(
                        "Cannot move \"{}\" into itself",
                        entry.name
                    )));
                }

                let moved = gateway.move_entry(entry.id, target).await?;
                info!(entry_id = %moved.id, target = ?target, "Pasted entry");
                self.slot = None;
                Ok(moved)
            }
        }
    }

    fn hold(&mut self, entry: &FileEntry, mode: ClipboardMode) -> String {
        self.slot = Some(ClipboardSlot {
            entry: entry.clone(),
            mode,
        });
        entry.name.clone()
    }
}
