//! Download command.

use std::path::{Path, PathBuf};

use clap::Args;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;
use drive_gateway::ByteStream;

use crate::output;
use crate::session;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Remote path of the file
    pub path: String,

    /// Local destination (defaults to the file name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the download command
pub async fn execute(args: &DownloadArgs, config: &ClientConfig) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    let entry = session::locate(&mut manager, &args.path).await?;
    let stream = manager.download(&entry).await?;

    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&entry.name));
    let written = save_stream(stream, &target).await?;

    output::print_success(&format!(
        "Downloaded '{}' to {} ({written} bytes)",
        entry.name,
        target.display()
    ));
    Ok(())
}

/// Write a download stream to disk, returning the number of bytes written.
pub async fn save_stream(mut stream: ByteStream, target: &Path) -> AppResult<u64> {
    let mut file = tokio::fs::File::create(target).await?;
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
