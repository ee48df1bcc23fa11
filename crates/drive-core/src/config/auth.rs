//! Authentication token configuration.

use serde::{Deserialize, Serialize};

/// Where the bearer token for the file store comes from.
///
/// An explicit `token` wins over the contents of `token_file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token, usually injected through `DRIVE__AUTH__TOKEN`.
    #[serde(default)]
    pub token: Option<String>,
    /// File holding the token written by `cloud-drive login`.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_file: default_token_file(),
        }
    }
}

fn default_token_file() -> String {
    ".cloud-drive/token".to_string()
}
