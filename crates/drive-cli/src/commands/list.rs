//! Folder listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;
use drive_entity::FileEntry;

use crate::output::{self, OutputFormat};
use crate::session;

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Remote folder path
    #[arg(default_value = "/")]
    pub path: String,
}

/// Listing row
#[derive(Debug, Serialize, Tabled)]
pub struct EntryRow {
    /// Entry ID
    pub id: i64,
    /// Name
    pub name: String,
    /// Folder or MIME type
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable size
    pub size: String,
    /// Upload time
    pub modified: String,
}

impl From<&FileEntry> for EntryRow {
    fn from(entry: &FileEntry) -> Self {
        Self {
            id: entry.id.get(),
            name: entry.name.clone(),
            kind: if entry.is_folder {
                "folder".to_string()
            } else {
                entry.mime_type.clone().unwrap_or_else(|| "-".to_string())
            },
            size: if entry.is_folder {
                "-".to_string()
            } else {
                entry.display_size()
            },
            modified: entry
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Print entries as rows
pub fn print_entries(entries: &[FileEntry], format: OutputFormat) {
    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
    output::print_list(&rows, format);
}

/// Execute the ls command
pub async fn execute(
    args: &ListArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    session::change_dir(&mut manager, &args.path).await?;
    print_entries(manager.entries(), format);
    Ok(())
}
