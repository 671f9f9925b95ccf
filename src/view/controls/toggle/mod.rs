//! Checkbox for boolean settings
//!
//! Renders as: `Label: [x]` or `Label: [ ]`

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::ToggleEvent;
pub use render::render_toggle_aligned;

use super::FocusState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    pub checked: bool,
    pub label: String,
    pub focus: FocusState,
}

impl ToggleState {
    pub fn new(checked: bool, label: impl Into<String>) -> Self {
        Self {
            checked,
            label: label.into(),
            focus: FocusState::Normal,
        }
    }

    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    /// Set the value; returns true if it changed
    pub fn set(&mut self, checked: bool) -> bool {
        let changed = self.checked != checked;
        self.checked = checked;
        changed
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToggleColors {
    pub bracket: Color,
    pub checkmark: Color,
    pub label: Color,
    pub focused: Color,
}

impl Default for ToggleColors {
    fn default() -> Self {
        Self {
            bracket: Color::Gray,
            checkmark: Color::Green,
            label: Color::White,
            focused: Color::Cyan,
        }
    }
}

/// Screen area of a rendered toggle
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleLayout {
    /// The `[x]` box
    pub checkbox_area: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let mut state = ToggleState::new(false, "Verbose");
        assert!(state.set(true));
        assert!(!state.set(true));
        state.toggle();
        assert!(!state.checked);
    }
}
