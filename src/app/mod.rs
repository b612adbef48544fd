//! Application state and input handling.
//!
//! [`App`] owns the [`SessionController`] plus the purely visual state
//! (focus, composer, sidebar selection, scroll, dialogs). The main loop
//! feeds it terminal events and session events; `ui::render` draws it.

mod handlers;
mod types;

pub use types::{DeleteDialog, Focus, SidebarEntry};

use crate::markdown::MarkdownCache;
use crate::session::SessionController;
use crate::widgets::Composer;

/// Ticks between loading indicator frames (16ms tick).
const ANIMATION_TICKS: u64 = 6;

/// Main application state
pub struct App {
    pub session: SessionController,
    pub focus: Focus,
    pub composer: Composer,
    /// Selected sidebar row, 0 is "New chat"
    pub sidebar_index: usize,
    pub delete_dialog: Option<DeleteDialog>,
    /// Lines scrolled up from the bottom of the conversation
    pub message_scroll: u16,
    /// Largest useful `message_scroll`, updated on render
    pub max_message_scroll: u16,
    /// Short-lived confirmation such as a clipboard copy
    pub status: Option<String>,
    pub should_quit: bool,
    /// Dirty flag, cleared after each draw
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub markdown_cache: MarkdownCache,
    pub api_url: String,
}

impl App {
    pub fn new(session: SessionController) -> Self {
        let api_url = session.client().base_url.clone();
        Self {
            session,
            focus: Focus::default(),
            composer: Composer::new(),
            sidebar_index: 0,
            delete_dialog: None,
            message_scroll: 0,
            max_message_scroll: 0,
            status: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            markdown_cache: MarkdownCache::new(),
            api_url,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advance the animation clock. Redraws while the loading indicator spins.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.session.is_loading() && self.tick_count % ANIMATION_TICKS == 0 {
            self.mark_dirty();
        }
    }

    /// Current loading indicator frame.
    pub fn animation_frame(&self) -> usize {
        (self.tick_count / ANIMATION_TICKS) as usize
    }

    /// Composer input is ignored while a request is outstanding.
    pub fn composer_disabled(&self) -> bool {
        self.session.is_loading()
    }

    /// Number of sidebar rows including "New chat".
    pub fn sidebar_len(&self) -> usize {
        self.session.threads().len() + 1
    }

    pub fn selected_entry(&self) -> SidebarEntry {
        SidebarEntry::from_index(self.sidebar_index)
    }

    /// Point the sidebar selection at the active thread, or "New chat" when
    /// the active thread is not saved yet.
    pub fn sync_sidebar_selection(&mut self) {
        let active = self.session.active_thread_id();
        self.sidebar_index = self
            .session
            .threads()
            .iter()
            .position(|t| t.thread_id == active)
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.message_scroll = 0;
    }
}
