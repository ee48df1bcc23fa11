//! Login command.

use clap::Args;

use drive_core::config::ClientConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_gateway::HttpGateway;

use crate::output;
use crate::session;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, config: &ClientConfig) -> AppResult<()> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let login = HttpGateway::login(&config.server, &username, &password).await?;
    session::save_token(config, &login.token).await?;

    output::print_success(&format!("Logged in as '{}'", login.username));
    output::print_kv("token file", &config.auth.token_file);
    Ok(())
}
