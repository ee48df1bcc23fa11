//! Inline rename.

use tracing::info;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::FileEntry;
use drive_gateway::MutationGateway;

/// The entry being renamed and the text typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameDraft {
    pub target: FileEntry,
    pub draft_name: String,
}

/// At most one rename is in progress.
#[derive(Debug, Clone, Default)]
pub struct RenameController {
    draft: Option<RenameDraft>,
}

impl RenameController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start renaming `entry`, seeding the draft with its current name.
    pub fn begin(&mut self, entry: &FileEntry) {
        self.draft = Some(RenameDraft {
            target: entry.clone(),
            draft_name: entry.name.clone(),
        });
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, name: impl Into<String>) -> AppResult<()> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| AppError::validation("No rename in progress"))?;
        draft.draft_name = name.into();
        Ok(())
    }

    pub fn draft(&self) -> Option<&RenameDraft> {
        self.draft.as_ref()
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Submit the trimmed draft. A blank name is refused locally and the
    /// draft stays open; so does a draft whose rename the store rejects.
    pub async fn commit(&mut self, gateway: &dyn MutationGateway) -> AppResult<FileEntry> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| AppError::validation("No rename in progress"))?;

        let name = draft.draft_name.trim();
        if name.is_empty() {
            return Err(AppError::empty_name("Name cannot be empty"));
        }

        let renamed = gateway.rename(draft.target.id, name).await?;
        info!(entry_id = %renamed.id, name = %renamed.name, "Renamed entry");
        self.draft = None;
        Ok(renamed)
    }
}
