//! File entry model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a remote entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// Return the raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A file or folder in the remote store.
///
/// The client only ever holds snapshots taken from a listing; it never
/// patches them after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// Entry name (including extension for files).
    pub name: String,
    /// Whether this entry is a folder.
    pub is_folder: bool,
    /// MIME type reported at upload time. Always `None` for folders.
    pub mime_type: Option<String>,
    /// Size in bytes. Always zero for folders.
    pub size_bytes: u64,
    /// When the entry was created.
    pub created_at: Option<NaiveDateTime>,
    /// Parent folder; `None` means the root.
    pub parent_id: Option<EntryId>,
    /// Logical path inside the store, when the server reports one.
    pub path: Option<String>,
}

impl FileEntry {
    /// Create a folder entry.
    pub fn folder(
        id: impl Into<EntryId>,
        name: impl Into<String>,
        parent_id: Option<EntryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_folder: true,
            mime_type: None,
            size_bytes: 0,
            created_at: None,
            parent_id,
            path: None,
        }
    }

    /// Create a file entry.
    pub fn file(
        id: impl Into<EntryId>,
        name: impl Into<String>,
        mime_type: Option<String>,
        size_bytes: u64,
        parent_id: Option<EntryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_folder: false,
            mime_type,
            size_bytes,
            created_at: None,
            parent_id,
            path: None,
        }
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }

    /// Human-readable size, `-` for folders.
    pub fn display_size(&self) -> String {
        if self.is_folder {
            return "-".to_string();
        }
        format_size(self.size_bytes)
    }
}

/// Format a byte count with binary units, two decimals at most.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
