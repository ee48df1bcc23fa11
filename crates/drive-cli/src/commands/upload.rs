//! File and directory upload command.

use std::path::PathBuf;

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_manager::UploadBatchResult;
use drive_manager::upload::local::dropped_from_path;

use crate::output::{self, OutputFormat};
use crate::session;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local files or directories to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Remote folder to upload into
    #[arg(short, long, default_value = "/")]
    pub to: String,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config: &ClientConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let mut manager = session::open(config).await?;
    session::change_dir(&mut manager, &args.to).await?;

    let mut items = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        items.push(dropped_from_path(path, config.upload.directory_page_size).await?);
    }

    let result = manager.upload_drop(items).await?;
    report(&result, format);

    if result.all_succeeded() {
        Ok(())
    } else {
        Err(AppError::gateway(format!(
            "{} of {} uploads failed",
            result.failure_count,
            result.attempted()
        )))
    }
}

/// Print a batch result
pub fn report(result: &UploadBatchResult, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(result, format),
        OutputFormat::Table => {
            if result.attempted() == 0 {
                output::print_warning("Nothing to upload");
                return;
            }
            for failure in &result.failures {
                output::print_error(&format!("{}: {}", failure.relative_path, failure.message));
            }
            output::print_success(&format!(
                "Uploaded {} file(s), {} failed",
                result.success_count, result.failure_count
            ));
        }
    }
}
