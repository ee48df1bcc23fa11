//! JSON shapes exchanged with the file store API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::model::{EntryId, FileEntry};

/// Response envelope wrapping every JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server considers the request successful.
    pub success: bool,
    /// Human-readable status message.
    #[serde(default)]
    pub message: String,
    /// Payload, absent on failures and on data-less successes.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A failed envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Entry as serialized by the file store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    /// Entry identifier.
    pub id: i64,
    /// Entry name.
    pub file_name: String,
    /// MIME type, or `"folder"` for folders.
    #[serde(default)]
    pub file_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: Option<i64>,
    /// Creation timestamp (server local time).
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
    /// Folder flag.
    #[serde(default)]
    pub is_folder: Option<bool>,
    /// Parent folder identifier.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Logical path.
    #[serde(default)]
    pub path: Option<String>,
}

impl From<FileDto> for FileEntry {
    fn from(dto: FileDto) -> Self {
        let is_folder = dto.is_folder.unwrap_or(false);
        Self {
            id: EntryId(dto.id),
            name: dto.file_name,
            is_folder,
            mime_type: if is_folder { None } else { dto.file_type },
            size_bytes: if is_folder {
                0
            } else {
                dto.file_size.unwrap_or(0).max(0) as u64
            },
            created_at: dto.uploaded_at,
            parent_id: dto.parent_id.map(EntryId),
            path: dto.path,
        }
    }
}

impl From<&FileEntry> for FileDto {
    fn from(entry: &FileEntry) -> Self {
        Self {
            id: entry.id.get(),
            file_name: entry.name.clone(),
            file_type: if entry.is_folder {
                Some("folder".to_string())
            } else {
                entry.mime_type.clone()
            },
            file_size: Some(entry.size_bytes as i64),
            uploaded_at: entry.created_at,
            is_folder: Some(entry.is_folder),
            parent_id: entry.parent_id.map(EntryId::get),
            path: entry.path.clone(),
        }
    }
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Payload returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Account name.
    pub username: String,
    /// Account e-mail.
    #[serde(default)]
    pub email: Option<String>,
}
