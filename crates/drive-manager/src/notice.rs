//! User-visible status messages.

use serde::Serialize;

use drive_core::error::AppError;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    /// The operation completed.
    Success,
    /// The operation failed.
    Error,
}

/// The last message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub text: String,
}

impl Notice {
    /// A success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// An error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// An error notice for a failed operation. Remote messages are kept
    /// verbatim after the context; local ones are shown as-is.
    pub fn failure(context: &str, err: &AppError) -> Self {
        if err.is_local() {
            Self::error(err.message.clone())
        } else {
            Self::error(format!("{context}: {}", err.message))
        }
    }

    /// Whether this is an error notice.
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
