//! Thread session management.
//!
//! The [`SessionController`] owns the active thread, its message list and
//! the known thread list. Remote calls run as spawned tasks; their results
//! come back as [`SessionEvent`]s and are applied in
//! [`SessionController::handle_event`].

mod controller;
mod events;

pub use controller::{Notice, SessionController, SessionState, SENTINEL_THREAD_ID};
pub use events::SessionEvent;
