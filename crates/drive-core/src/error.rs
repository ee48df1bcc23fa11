//! Unified error types for the Cloud Drive client.
//!
//! Controllers report local validation failures and remote failures through
//! the same [`AppError`], so a front end can show one message per failure
//! without caring where it came from.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Paste was requested while the clipboard slot is empty.
    EmptyClipboard,
    /// The requested operation exists in the menu but has no implementation.
    NotImplemented,
    /// A name (rename draft, new folder) is blank after trimming.
    EmptyName,
    /// The entry is not a text-like file and cannot be previewed.
    NotPreviewable,
    /// The entry cannot receive the dragged or pasted entry.
    InvalidDropTarget,
    /// Any other local misuse (opening a file as a folder, unavailable action).
    Validation,
    /// The remote gateway rejected the request or could not be reached.
    Gateway,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A local filesystem error occurred.
    Io,
    /// An internal client error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyClipboard => write!(f, "EMPTY_CLIPBOARD"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
            Self::EmptyName => write!(f, "EMPTY_NAME"),
            Self::NotPreviewable => write!(f, "NOT_PREVIEWABLE"),
            Self::InvalidDropTarget => write!(f, "INVALID_DROP_TARGET"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Gateway => write!(f, "GATEWAY"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Io => write!(f, "IO"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout the client.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an empty-clipboard error.
    pub fn empty_clipboard() -> Self {
        Self::new(ErrorKind::EmptyClipboard, "Clipboard is empty")
    }

    /// Create a not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// Create an empty-name error.
    pub fn empty_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyName, message)
    }

    /// Create a not-previewable error.
    pub fn not_previewable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotPreviewable, message)
    }

    /// Create an invalid-drop-target error.
    pub fn invalid_drop_target(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDropTarget, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a gateway error carrying the remote message verbatim.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Gateway, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error was detected locally, before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::EmptyClipboard
                | ErrorKind::NotImplemented
                | ErrorKind::EmptyName
                | ErrorKind::NotPreviewable
                | ErrorKind::InvalidDropTarget
                | ErrorKind::Validation
        )
    }

    /// Whether the error came from the remote gateway.
    pub fn is_gateway(&self) -> bool {
        self.kind == ErrorKind::Gateway
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
