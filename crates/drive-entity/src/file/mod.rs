//! File and folder entries.

pub mod model;
pub mod preview;
pub mod wire;

pub use model::{EntryId, FileEntry};
pub use preview::is_previewable;
pub use wire::{ApiResponse, FileDto, LoginData, LoginRequest};
