//! Context menu anchored to a row or to the empty listing area.

use std::fmt;

use serde::Serialize;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_entity::FileEntry;

/// Actions a context menu can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuAction {
    Copy,
    Cut,
    Paste,
    Rename,
    Delete,
    Download,
}

impl MenuAction {
    /// Label shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::Copy => "Copy",
            Self::Cut => "Cut",
            Self::Paste => "Paste",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
            Self::Download => "Download",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub action: MenuAction,
    pub enabled: bool,
}

/// Where the menu is open and what it targets (`None` = empty area).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMenuState {
    pub x: i32,
    pub y: i32,
    pub target: Option<FileEntry>,
}

/// At most one menu is open at a time.
#[derive(Debug, Clone, Default)]
pub struct ContextMenuController {
    state: Option<ContextMenuState>,
}

impl ContextMenuController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open at `(x, y)`, replacing any open menu.
    pub fn open(&mut self, x: i32, y: i32, target: Option<&FileEntry>) {
        self.state = Some(ContextMenuState {
            x,
            y,
            target: target.cloned(),
        });
    }

    /// Close without acting. Clicking anywhere else lands here.
    pub fn close(&mut self) {
        self.state = None;
    }

    pub fn state(&self) -> Option<&ContextMenuState> {
        self.state.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Items of the open menu, empty when closed.
    pub fn items(&self, clipboard_filled: bool) -> Vec<MenuItem> {
        self.state
            .as_ref()
            .map(|state| items_for(state.target.as_ref(), clipboard_filled))
            .unwrap_or_default()
    }

    /// Close the menu and hand back its target if `action` was offered and
    /// enabled.
    pub fn take_for_dispatch(
        &mut self,
        action: MenuAction,
        clipboard_filled: bool,
    ) -> AppResult<Option<FileEntry>> {
        let state = self
            .state
            .take()
            .ok_or_else(|| AppError::validation("No context menu is open"))?;

        let offered = items_for(state.target.as_ref(), clipboard_filled)
            .iter()
            .any(|item| item.action == action && item.enabled);
        if !offered {
            return Err(AppError::validation(format!("{action} is not available here")));
        }
        Ok(state.target)
    }
}

/// Menu contents for a target. Rows get Copy, Cut, Rename and Delete, plus
/// Download for files and Paste when the clipboard holds something. The
/// empty area offers only Paste, disabled while the clipboard is empty.
pub fn items_for(target: Option<&FileEntry>, clipboard_filled: bool) -> Vec<MenuItem> {
    let enabled = |action| MenuItem {
        action,
        enabled: true,
    };

    match target {
        None => vec![MenuItem {
            action: MenuAction::Paste,
            enabled: clipboard_filled,
        }],
        Some(entry) => {
            let mut items = vec![enabled(MenuAction::Copy), enabled(MenuAction::Cut)];
            if clipboard_filled {
                items.push(enabled(MenuAction::Paste));
            }
            items.push(enabled(MenuAction::Rename));
            items.push(enabled(MenuAction::Delete));
            if !entry.is_folder {
                items.push(enabled(MenuAction::Download));
            }
            items
        }
    }
}
