//! Rename command.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;

use crate::output;
use crate::session;

/// Arguments for the rename command
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Remote path of the entry
    pub path: String,
    /// New name
    pub new_name: String,
}

/// Execute the rename command
pub async fn execute(args: &RenameArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let entry = session::locate(&mut manager, &args.path).await?;
    manager.rename_entry(&entry, &args.new_name).await?;
    output::print_notice(manager.notice());
    Ok(())
}
