//! Reusable input widgets.

pub mod composer;

pub use composer::{Composer, ComposerLayout, COMPOSER_MAX_ROWS};
