//! CLI command definitions and dispatch.

pub mod download;
pub mod list;
pub mod login;
pub mod mkdir;
pub mod mv;
pub mod preview;
pub mod remove;
pub mod rename;
pub mod shell;
pub mod upload;

use clap::{Parser, Subcommand};

use drive_core::config::ClientConfig;
use drive_core::result::AppResult;

use crate::output::OutputFormat;

/// Cloud Drive: browse and manage files on a remote store
#[derive(Debug, Parser)]
#[command(name = "cloud-drive", version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file, layered over config/default.toml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Configuration environment (selects config/{env}.toml)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login(login::LoginArgs),
    /// List a folder
    Ls(list::ListArgs),
    /// Upload local files or directories
    Upload(upload::UploadArgs),
    /// Create a folder
    Mkdir(mkdir::MkdirArgs),
    /// Delete a file or folder
    Rm(remove::RemoveArgs),
    /// Move a file or folder into another folder
    Mv(mv::MoveArgs),
    /// Rename a file or folder
    Rename(rename::RenameArgs),
    /// Download a file
    Download(download::DownloadArgs),
    /// Print a text file
    Cat(preview::PreviewArgs),
    /// Interactive file manager
    Shell,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> AppResult<()> {
        match &self.command {
            Commands::Login(args) => login::execute(args, config).await,
            Commands::Ls(args) => list::execute(args, config, self.format).await,
            Commands::Upload(args) => upload::execute(args, config, self.format).await,
            Commands::Mkdir(args) => mkdir::execute(args, config).await,
            Commands::Rm(args) => remove::execute(args, config).await,
            Commands::Mv(args) => mv::execute(args, config).await,
            Commands::Rename(args) => rename::execute(args, config).await,
            Commands::Download(args) => download::execute(args, config).await,
            Commands::Cat(args) => preview::execute(args, config).await,
            Commands::Shell => shell::execute(config, self.format).await,
        }
    }
}
