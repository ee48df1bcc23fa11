//! Which entries can be previewed as text.
//!
//! The check runs on the client before any preview request is made.

use super::model::FileEntry;

/// MIME type prefixes accepted for text preview.
pub const TEXT_MIME_PREFIXES: &[&str] = &[
    "text/",
    "application/json",
    "application/xml",
    "application/javascript",
];

/// File extensions accepted for text preview, lowercase.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt",
    "md",
    "json",
    "xml",
    "html",
    "css",
    "js",
    "jsx",
    "ts",
    "tsx",
    "java",
    "py",
    "cpp",
    "c",
    "h",
    "sh",
    "yml",
    "yaml",
    "properties",
    "sql",
];

/// Whether `entry` is a text-like file the store can preview.
pub fn is_previewable(entry: &FileEntry) -> bool {
    if entry.is_folder {
        return false;
    }

    let by_mime = entry
        .mime_type
        .as_deref()
        .is_some_and(|mime| TEXT_MIME_PREFIXES.iter().any(|p| mime.starts_with(p)));

    by_mime
        || entry
            .extension()
            .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}
