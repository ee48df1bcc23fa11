//! Move command, carried out as cut and paste.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;

use crate::output;
use crate::session;

/// Arguments for the mv command
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Remote path of the entry to move
    pub source: String,
    /// Remote folder to move it into
    pub destination: String,
}

/// Execute the mv command
pub async fn execute(args: &MoveArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let entry = session::locate(&mut manager, &args.source).await?;
    manager.cut(&entry);

    session::change_dir(&mut manager, "/").await?;
    session::change_dir(&mut manager, &args.destination).await?;
    manager.paste().await?;

    output::print_notice(manager.notice());
    Ok(())
}
