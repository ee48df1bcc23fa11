//! Folder creation command.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;

use crate::output;
use crate::session;

/// Arguments for the mkdir command
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Remote path of the new folder
    pub path: String,
}

/// Execute the mkdir command
pub async fn execute(args: &MkdirArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let (parent, name) = session::split_path(&args.path);
    session::change_dir(&mut manager, parent).await?;

    let folder = manager.create_folder(name).await?;
    output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
    Ok(())
}
