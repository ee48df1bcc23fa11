//! Cloud Drive client
//!
//! Entry point: parses the command line, loads layered configuration,
//! initializes logging and runs the selected command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use drive_cli::Cli;
use drive_core::config::ClientConfig;
use drive_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e.message);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e.message);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration(cli: &Cli) -> Result<ClientConfig, AppError> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("DRIVE_CONFIG").ok());
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("DRIVE_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    ClientConfig::load(config_path.as_deref(), &env)
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// clean on stdout.
fn init_logging(config: &ClientConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
