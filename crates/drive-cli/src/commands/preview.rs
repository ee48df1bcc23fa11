//! Print a text file.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;

use crate::session;

/// Arguments for the cat command
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Remote path of a text file
    pub path: String,
}

/// Execute the cat command
pub async fn execute(args: &PreviewArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let entry = session::locate(&mut manager, &args.path).await?;
    let text = manager.preview(&entry).await?;
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
