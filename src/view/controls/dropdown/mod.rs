//! Dropdown selection control
//!
//! Renders as: `Label: [Selected Option ▼]`
//!
//! Used for enumerations and font families. A dropdown over named colors
//! paints each option on its own color with contrasting text.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::DropdownEvent;
pub use render::render_dropdown_aligned;

use super::FocusState;
use crate::model::color::Swatch;

/// State for a dropdown control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownState {
    pub selected: usize,
    pub options: Vec<String>,
    pub label: String,
    pub open: bool,
    pub focus: FocusState,
    /// Selection when the list was opened, restored on cancel
    original_selected: Option<usize>,
    pub scroll_offset: usize,
    pub max_visible: usize,
    /// Options are color names drawn as swatches
    pub color_swatches: bool,
    /// Options are font families drawn in their own style
    pub font_preview: bool,
}

impl DropdownState {
    pub fn new(options: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            selected: 0,
            options,
            label: label.into(),
            open: false,
            focus: FocusState::Normal,
            original_selected: None,
            scroll_offset: 0,
            max_visible: 5,
            color_swatches: false,
            font_preview: false,
        }
    }

    /// Set the initially selected index
    pub fn with_selected(mut self, index: usize) -> Self {
        if index < self.options.len() {
            self.selected = index;
        }
        self
    }

    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_color_swatches(mut self) -> Self {
        self.color_swatches = true;
        self
    }

    pub fn with_font_preview(mut self) -> Self {
        self.font_preview = true;
        self
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Index of an option by name, ignoring ASCII case
    pub fn index_of(&self, option: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o == option)
            .or_else(|| self.options.iter().position(|o| o.eq_ignore_ascii_case(option)))
    }

    /// Swatch for an option, when this dropdown shows colors
    pub fn swatch(&self, index: usize) -> Option<Swatch> {
        if !self.color_swatches {
            return None;
        }
        self.options.get(index).and_then(|name| Swatch::named(name))
    }

    /// Swatch of the current selection
    pub fn selected_swatch(&self) -> Option<Swatch> {
        self.swatch(self.selected)
    }

    pub fn toggle_open(&mut self) {
        self.original_selected = if self.open { None } else { Some(self.selected) };
        self.open = !self.open;
        if self.open {
            self.ensure_visible();
        }
    }

    /// Restore the selection from when the list opened, and close
    pub fn cancel(&mut self) {
        if let Some(original) = self.original_selected.take() {
            self.selected = original;
        }
        self.open = false;
    }

    /// Keep the selection and close
    pub fn confirm(&mut self) {
        self.original_selected = None;
        self.open = false;
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
            self.ensure_visible();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = if self.selected == 0 {
                self.options.len() - 1
            } else {
                self.selected - 1
            };
            self.ensure_visible();
        }
    }

    /// Select an option by index and close
    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = index;
            self.original_selected = None;
            self.open = false;
        }
    }

    /// Keep the selected option inside the scrolled window
    pub fn ensure_visible(&mut self) {
        if self.max_visible == 0 || self.options.len() <= self.max_visible {
            self.scroll_offset = 0;
            return;
        }

        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.max_visible {
            self.scroll_offset = self.selected.saturating_sub(self.max_visible - 1);
        }
    }
}

/// Colors for the dropdown control
#[derive(Debug, Clone, Copy)]
pub struct DropdownColors {
    pub label: Color,
    pub selected: Color,
    pub border: Color,
    pub arrow: Color,
    pub option: Color,
    pub highlight_bg: Color,
    pub focused: Color,
}

impl Default for DropdownColors {
    fn default() -> Self {
        Self {
            label: Color::White,
            selected: Color::Cyan,
            border: Color::Gray,
            arrow: Color::DarkGray,
            option: Color::White,
            highlight_bg: Color::DarkGray,
            focused: Color::Cyan,
        }
    }
}

/// Screen area of a rendered dropdown
#[derive(Debug, Clone, Copy, Default)]
pub struct DropdownLayout {
    /// The `[Selected ▼]` button
    pub button_area: Rect,
}
