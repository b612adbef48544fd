//! Color theme constants for the UniRAG UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused pane
pub const COLOR_BORDER_FOCUSED: Color = Color::Gray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color - white for the logo
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// User message marker
pub const COLOR_USER: Color = Color::Cyan;

/// Assistant message marker
pub const COLOR_ASSISTANT: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Backend reachable
pub const COLOR_CONNECTED: Color = Color::LightGreen;

/// Backend unreachable, and failure notices
pub const COLOR_ERROR: Color = Color::Red;

/// Health probe still running
pub const COLOR_PENDING: Color = Color::Yellow;

/// Background of the selected sidebar row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 40, 55);

/// Background for dialog boxes
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
