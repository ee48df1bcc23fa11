//! Delete command.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;

use crate::output;
use crate::session;

/// Arguments for the rm command
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Remote path of the file or folder
    pub path: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the rm command
pub async fn execute(args: &RemoveArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let entry = session::locate(&mut manager, &args.path).await?;

    if !args.yes && !confirm_delete(&entry.name, entry.is_folder)? {
        output::print_warning("Cancelled");
        return Ok(());
    }

    manager.delete(&entry).await?;
    output::print_notice(manager.notice());
    Ok(())
}

/// Ask before deleting
pub fn confirm_delete(name: &str, is_folder: bool) -> AppResult<bool> {
    let what = if is_folder { "folder and everything in it" } else { "file" };
    dialoguer::Confirm::new()
        .with_prompt(format!("Delete {what} '{name}'?"))
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
