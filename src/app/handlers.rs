//! Key, paste and session event handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use super::{App, DeleteDialog, Focus, SidebarEntry};
use crate::clipboard::{self, ClipboardError};
use crate::session::SessionEvent;

/// Lines moved by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// Lines moved per mouse wheel notch.
const MOUSE_SCROLL: u16 = 3;

impl App {
    /// Handle a key press. Every key marks the app dirty.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if self.delete_dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit();
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.start_new_chat();
                return;
            }
            KeyCode::Char('y') if ctrl => {
                self.copy_latest_reply();
                return;
            }
            KeyCode::Esc => {
                self.session.dismiss_notice();
                self.status = None;
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return;
            }
            KeyCode::PageUp => {
                self.message_scroll = self
                    .message_scroll
                    .saturating_add(PAGE_SCROLL)
                    .min(self.max_message_scroll);
                return;
            }
            KeyCode::PageDown => {
                self.message_scroll = self.message_scroll.saturating_sub(PAGE_SCROLL);
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Composer => self.handle_composer_key(key),
        }
    }

    /// Bracketed paste goes to the composer.
    pub fn handle_paste(&mut self, text: &str) {
        self.mark_dirty();
        if self.delete_dialog.is_some() || self.composer_disabled() {
            return;
        }
        self.focus = Focus::Composer;
        self.composer.paste(text);
    }

    /// Mouse wheel scrolls the conversation.
    pub fn handle_mouse_scroll(&mut self, up: bool) {
        self.mark_dirty();
        if up {
            self.message_scroll = self
                .message_scroll
                .saturating_add(MOUSE_SCROLL)
                .min(self.max_message_scroll);
        } else {
            self.message_scroll = self.message_scroll.saturating_sub(MOUSE_SCROLL);
        }
    }

    /// Apply a completed background call.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        self.mark_dirty();
        let reply = matches!(event, SessionEvent::ReplyReceived { .. });
        let history = matches!(event, SessionEvent::HistoryLoaded { .. });

        self.session.handle_event(event);

        if reply || history {
            self.scroll_to_bottom();
        }
        if reply {
            // A first exchange may have added the active thread to the list
            self.sync_sidebar_selection();
        }
        self.sidebar_index = self.sidebar_index.min(self.sidebar_len() - 1);
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.delete_dialog = None;
            }
            _ => {}
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar_index = self.sidebar_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.sidebar_index + 1 < self.sidebar_len() {
                    self.sidebar_index += 1;
                }
            }
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Delete | KeyCode::Char('d') => self.request_delete(),
            _ => {}
        }
    }

    fn handle_composer_key(&mut self, key: KeyEvent) {
        if self.composer_disabled() {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let newline_mods = key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter if newline_mods => self.composer.insert_newline(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char('j') if ctrl => self.composer.insert_newline(),
            KeyCode::Char('w') if ctrl => self.composer.delete_word_backward(),
            KeyCode::Char('a') if ctrl => self.composer.move_home(),
            KeyCode::Char('e') if ctrl => self.composer.move_end(),
            KeyCode::Char(c) if !ctrl => self.composer.insert_char(c),
            KeyCode::Backspace => self.composer.backspace(),
            KeyCode::Delete => self.composer.delete(),
            KeyCode::Left => self.composer.move_left(),
            KeyCode::Right => self.composer.move_right(),
            KeyCode::Home => self.composer.move_home(),
            KeyCode::End => self.composer.move_end(),
            KeyCode::Up => {
                self.composer.move_up();
            }
            KeyCode::Down => {
                self.composer.move_down();
            }
            _ => {}
        }
    }

    /// Send the composer text. The composer is cleared only when the
    /// session accepted the message.
    pub fn submit(&mut self) {
        let text = self.composer.text();
        if self.session.send_message(&text) {
            self.composer.clear();
            self.status = None;
            self.scroll_to_bottom();
        }
    }

    pub fn start_new_chat(&mut self) {
        self.session.new_thread();
        self.delete_dialog = None;
        self.sidebar_index = 0;
        self.focus = Focus::Composer;
        self.scroll_to_bottom();
    }

    /// Open the sidebar row under the selection.
    pub fn activate_selected(&mut self) {
        match self.selected_entry() {
            SidebarEntry::NewChat => self.start_new_chat(),
            SidebarEntry::Thread(i) => {
                let Some(id) = self.session.threads().get(i).map(|t| t.thread_id.clone()) else {
                    return;
                };
                self.session.select_thread(&id);
                self.focus = Focus::Composer;
                self.scroll_to_bottom();
            }
        }
    }

    /// Ask for confirmation before deleting the selected thread.
    pub fn request_delete(&mut self) {
        let SidebarEntry::Thread(i) = self.selected_entry() else {
            return;
        };
        if let Some(thread) = self.session.threads().get(i) {
            self.delete_dialog = Some(DeleteDialog {
                thread_id: thread.thread_id.clone(),
                title: thread.title.clone(),
            });
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(dialog) = self.delete_dialog.take() else {
            return;
        };
        self.session.delete_thread(&dialog.thread_id);
        self.sync_sidebar_selection();
    }

    /// Copy the last code block (or the whole last reply) to the clipboard.
    pub fn copy_latest_reply(&mut self) {
        match clipboard::copy_latest(self.session.messages()) {
            Ok(target) => {
                debug!("{}", target.describe());
                self.status = Some(target.describe());
            }
            Err(ClipboardError::NothingToCopy) => {
                self.status = Some(ClipboardError::NothingToCopy.to_string());
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.session.set_notice(e.to_string());
            }
        }
    }
}
