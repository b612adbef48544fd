//! Type definitions for the application state.
//!
//! - [`Focus`] - Which pane receives keys
//! - [`SidebarEntry`] - What a sidebar row stands for
//! - [`DeleteDialog`] - Pending delete confirmation

/// Represents which UI component has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Composer,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Composer,
            Focus::Composer => Focus::Sidebar,
        }
    }
}

/// A row of the sidebar. Row 0 is always "New chat"; the saved threads follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    NewChat,
    /// Index into the thread list
    Thread(usize),
}

impl SidebarEntry {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => SidebarEntry::NewChat,
            n => SidebarEntry::Thread(n - 1),
        }
    }
}

/// Delete confirmation waiting for y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    pub thread_id: String,
    pub title: String,
}
