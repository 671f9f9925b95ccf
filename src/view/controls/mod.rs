//! Editor controls
//!
//! Each control is a plain state struct, a `render_*_aligned` function that
//! draws it with ratatui and a `handle_key` method that turns crossterm key
//! events into control events. Controls know nothing about settings; the
//! binding layer reads their native values. Pointer input is hit-tested
//! by the settings view and arrives as edits.

pub mod dropdown;
pub mod number_input;
pub mod text_input;
pub mod toggle;

/// Whether a control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
}
