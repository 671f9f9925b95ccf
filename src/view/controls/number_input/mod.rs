//! Number input control with increment/decrement
//!
//! Renders as: `Label: [ 1,234.50 ] [-] [+]`
//!
//! Values are fixed-point: `value`, `min`, `max` and `step` are integers
//! scaled by `10^decimal_places`, so integer and floating settings share one
//! control and never accumulate rounding error while stepping.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::NumberInputEvent;
pub use render::render_number_input_aligned;

use super::FocusState;

/// State for a number input control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInputState {
    /// Current value, scaled
    pub value: i128,
    pub min: i128,
    pub max: i128,
    /// Step amount for increment/decrement, scaled
    pub step: i128,
    pub decimal_places: u32,
    pub label: String,
    pub focus: FocusState,
    /// Text being typed (None when not editing)
    pub editor: Option<String>,
}

impl NumberInputState {
    /// Create a state over the whole-unit range `[min, max]`.
    ///
    /// Scaling saturates, so a range too wide for the requested decimal
    /// places is cut down to what an `i128` can hold.
    pub fn new(label: impl Into<String>, min: i128, max: i128, decimal_places: u32) -> Self {
        let factor = scale_factor(decimal_places);
        let (min, max) = (min.saturating_mul(factor), max.saturating_mul(factor));
        Self {
            value: 0i128.clamp(min, max),
            min,
            max,
            step: factor,
            decimal_places,
            label: label.into(),
            focus: FocusState::Normal,
            editor: None,
        }
    }

    /// Set the step in whole units
    pub fn with_step(mut self, step: i128) -> Self {
        self.step = step.saturating_mul(scale_factor(self.decimal_places));
        self
    }

    /// Set the scaled value, clamped to the range
    pub fn with_value(mut self, value: i128) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Whether a scaled value is inside the allowed range
    pub fn in_range(&self, value: i128) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(self.step).min(self.max);
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(self.step).max(self.min);
    }

    /// Set the value directly, respecting min/max.
    ///
    /// Returns false when `value` was outside the range and got clamped.
    pub fn set_value(&mut self, value: i128) -> bool {
        self.value = value.clamp(self.min, self.max);
        self.value == value
    }

    /// Start editing with the current value as text
    pub fn start_editing(&mut self) {
        self.editor = Some(self.canonical_text());
    }

    pub fn cancel_editing(&mut self) {
        self.editor = None;
    }

    /// Finish editing and hand back the typed text for conversion
    pub fn take_edit(&mut self) -> Option<String> {
        self.editor.take()
    }

    /// Insert a character while editing; only number characters are kept
    pub fn insert_char(&mut self, c: char) {
        if let Some(editor) = &mut self.editor {
            if c.is_ascii_digit() || c == '-' || c == '.' {
                editor.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(editor) = &mut self.editor {
            editor.pop();
        }
    }

    /// Plain text form of the value, as handed to type conversion
    pub fn canonical_text(&self) -> String {
        format_scaled(self.value, self.decimal_places, false)
    }

    /// Text shown in the control: the edit buffer, or the value with
    /// thousands separators
    pub fn display_text(&self) -> String {
        match &self.editor {
            Some(editor) => editor.clone(),
            None => format_scaled(self.value, self.decimal_places, true),
        }
    }
}

/// `10^decimal_places`, saturating at `i128::MAX`
pub fn scale_factor(decimal_places: u32) -> i128 {
    10i128.saturating_pow(decimal_places)
}

/// Format a scaled value with a fixed number of decimals
pub fn format_scaled(value: i128, decimal_places: u32, grouping: bool) -> String {
    let factor = 10u128.saturating_pow(decimal_places);
    let magnitude = value.unsigned_abs();
    let whole = (magnitude / factor).to_string();
    let whole = if grouping { group_thousands(&whole) } else { whole };

    let mut text = String::with_capacity(whole.len() + decimal_places as usize + 2);
    if value < 0 {
        text.push('-');
    }
    text.push_str(&whole);
    if decimal_places > 0 {
        let fraction = magnitude % factor;
        text.push('.');
        text.push_str(&format!("{:0width$}", fraction, width = decimal_places as usize));
    }
    text
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Colors for the number input control
#[derive(Debug, Clone, Copy)]
pub struct NumberInputColors {
    pub label: Color,
    pub value: Color,
    pub border: Color,
    pub button: Color,
    pub focused: Color,
}

impl Default for NumberInputColors {
    fn default() -> Self {
        Self {
            label: Color::White,
            value: Color::Yellow,
            border: Color::Gray,
            button: Color::Cyan,
            focused: Color::Cyan,
        }
    }
}

/// Screen areas of a rendered number input
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInputLayout {
    /// The bracketed value field
    pub value_area: Rect,
    /// Value field and step buttons together
    pub control_area: Rect,
}
