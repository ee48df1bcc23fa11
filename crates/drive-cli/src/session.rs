//! Building a file manager from configuration and walking remote paths.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use drive_core::config::ClientConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::FileEntry;
use drive_gateway::HttpGateway;
use drive_manager::FileManager;

/// Bearer token from configuration, falling back to the token file.
pub async fn resolve_token(config: &ClientConfig) -> AppResult<Option<String>> {
    if let Some(token) = config.auth.token.as_ref().filter(|t| !t.trim().is_empty()) {
        return Ok(Some(token.trim().to_string()));
    }

    let path = Path::new(&config.auth.token_file);
    if !tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "No token file");
        return Ok(None);
    }
    let token = tokio::fs::read_to_string(path).await?;
    let token = token.trim();
    Ok((!token.is_empty()).then(|| token.to_string()))
}

/// Store a token where [`resolve_token`] will find it.
pub async fn save_token(config: &ClientConfig, token: &str) -> AppResult<()> {
    let path = Path::new(&config.auth.token_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, token).await?;
    Ok(())
}

/// Connect to the store and list the root.
pub async fn open(config: &ClientConfig) -> AppResult<FileManager> {
    let token = resolve_token(config).await?;
    let gateway = HttpGateway::new(&config.server, token)?;
    debug!(base_url = gateway.base_url(), "Opening session");

    let mut manager = FileManager::new(Arc::new(gateway), config.upload.clone());
    manager.refresh().await?;
    Ok(manager)
}

/// Change the open folder. Absolute paths start from the root; `..` goes
/// up one level and `.` stays put.
pub async fn change_dir(manager: &mut FileManager, path: &str) -> AppResult<()> {
    if path.starts_with('/') {
        manager.navigate_to_breadcrumb(-1).await?;
    }

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment {
            "." => {}
            ".." => {
                let depth = manager.breadcrumbs().len() as isize;
                if depth > 0 {
                    manager.navigate_to_breadcrumb(depth - 2).await?;
                }
            }
            name => {
                let folder = manager
                    .find(name)
                    .filter(|entry| entry.is_folder)
                    .cloned()
                    .ok_or_else(|| AppError::validation(format!("No such folder: {name}")))?;
                manager.open_folder(&folder).await?;
            }
        }
    }
    Ok(())
}

/// Split a path into its folder part and final name.
pub fn split_path(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(index) => (&trimmed[..index], &trimmed[index + 1..]),
        None => ("", trimmed),
    }
}

/// Open the folder holding `path` and return the entry it names.
pub async fn locate(manager: &mut FileManager, path: &str) -> AppResult<FileEntry> {
    let (dir, name) = split_path(path);
    if name.is_empty() {
        return Err(AppError::validation(format!("Not an entry path: {path}")));
    }
    change_dir(manager, dir).await?;
    manager
        .find(name)
        .cloned()
        .ok_or_else(|| AppError::validation(format!("No such file or folder: {path}")))
}
