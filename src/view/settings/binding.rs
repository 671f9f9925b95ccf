//! Widget to store binding
//!
//! An edit first changes the control. If it produces a value to commit, the
//! control's native value (or typed text) is converted with the declared
//! type's string conversion, checked against the control's range, and
//! written back to the source by name. Wrapped settings only have their
//! inner value replaced.

use super::schema::SettingDescriptor;
use super::widgets::EditorControl;
use crate::model::option_wrapper::OptionWrapper;
use crate::model::value::{ConversionError, SettingValue};
use crate::source::{SettingsSource, StoreError, StoreValue};
use crate::view::controls::number_input::format_scaled;

/// A user edit, expressed against the control it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEdit {
    SetChecked(bool),
    Toggle,
    Increment,
    Decrement,
    /// Text typed into a spinner
    EnterNumber(String),
    /// Pick a dropdown option by index
    Select(usize),
    /// Pick a dropdown option by name; unlisted names are converted as typed
    SelectOption(String),
    /// Replace a text input's buffer without committing it
    Type(String),
    /// Focus left the control; buffered text is committed
    Blur,
}

/// Result of an edit as seen by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The value was converted and written to the source
    Committed(SettingValue),
    /// The control changed; the value is written later
    Buffered,
    Ignored,
    /// The value did not convert; the source was not touched
    Rejected(ConversionError),
    /// The value converted but the source refused to store it
    WriteFailed(StoreError),
}

/// What an edit asks the binding to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Convert this text and write it back
    Commit(String),
    /// The control changed but nothing is written yet
    Buffered,
    /// The edit does not apply to this control
    Ignored,
}

/// Apply an edit to a control
pub fn apply(control: &mut EditorControl, edit: WidgetEdit) -> Intent {
    match (control, edit) {
        (EditorControl::Toggle(toggle), WidgetEdit::SetChecked(checked)) => {
            toggle.checked = checked;
            Intent::Commit(checked.to_string())
        }
        (EditorControl::Toggle(toggle), WidgetEdit::Toggle) => {
            toggle.toggle();
            Intent::Commit(toggle.checked.to_string())
        }
        (EditorControl::Spinner(spinner), WidgetEdit::Increment) => {
            spinner.increment();
            Intent::Commit(spinner.canonical_text())
        }
        (EditorControl::Spinner(spinner), WidgetEdit::Decrement) => {
            spinner.decrement();
            Intent::Commit(spinner.canonical_text())
        }
        (EditorControl::Spinner(spinner), WidgetEdit::EnterNumber(text)) => {
            spinner.cancel_editing();
            Intent::Commit(text)
        }
        (EditorControl::Spinner(spinner), WidgetEdit::Blur) => match spinner.take_edit() {
            Some(text) => Intent::Commit(text),
            None => Intent::Ignored,
        },
        (EditorControl::Dropdown(dropdown), WidgetEdit::Select(index)) => {
            if index >= dropdown.options.len() {
                return Intent::Ignored;
            }
            dropdown.select(index);
            Intent::Commit(dropdown.selected_option().unwrap_or_default().to_string())
        }
        (EditorControl::Dropdown(dropdown), WidgetEdit::SelectOption(name)) => {
            if let Some(index) = dropdown.index_of(&name) {
                dropdown.select(index);
            }
            Intent::Commit(name)
        }
        (EditorControl::Text(text), WidgetEdit::Type(value)) => {
            text.set_value(value);
            Intent::Buffered
        }
        (EditorControl::Text(text), WidgetEdit::Blur) => Intent::Commit(text.value.clone()),
        _ => Intent::Ignored,
    }
}

/// Convert committed text to a value of the descriptor's type.
///
/// Spinner values must also fit the spinner's range; floating values are
/// rounded to the spinner's decimal places so the store holds what is shown.
pub fn convert(
    descriptor: &SettingDescriptor,
    control: &EditorControl,
    text: &str,
) -> Result<SettingValue, ConversionError> {
    let value = descriptor.value_type.parse(text)?;

    let EditorControl::Spinner(spinner) = control else {
        return Ok(value);
    };

    let type_name = descriptor.value_type.type_name();
    let scaled = value
        .to_scaled(spinner.decimal_places)
        .ok_or_else(|| ConversionError::new(type_name, text, "not a number"))?;

    if !spinner.in_range(scaled) {
        return Err(ConversionError::new(
            type_name,
            text,
            format!(
                "must be between {} and {}",
                format_scaled(spinner.min, spinner.decimal_places, false),
                format_scaled(spinner.max, spinner.decimal_places, false)
            ),
        ));
    }

    if descriptor.value_type.is_floating() {
        let rounded = format_scaled(scaled, spinner.decimal_places, false);
        return descriptor.value_type.parse(&rounded);
    }
    Ok(value)
}

/// Write a converted value back to the source
pub fn write_back<S: SettingsSource + ?Sized>(
    source: &mut S,
    descriptor: &SettingDescriptor,
    value: SettingValue,
) -> Result<(), StoreError> {
    let stored = if descriptor.wrapped {
        let option = match source.get(&descriptor.name) {
            Some(StoreValue::Wrapped { mut option }) => {
                option.value = value;
                option
            }
            _ => {
                let mut option = OptionWrapper::new(value)
                    .with_tree(descriptor.tree_label.as_str())
                    .with_group(descriptor.group_label.as_str());
                if let Some(description) = &descriptor.description {
                    option = option.with_description(description.as_str());
                }
                option
            }
        };
        StoreValue::wrapped(option)
    } else {
        StoreValue::plain(value)
    };
    source.set(&descriptor.name, stored)
}

/// Current value of a setting as the store holds it, falling back to the
/// value seen at discovery
pub fn stored_value<S: SettingsSource + ?Sized>(
    source: &S,
    descriptor: &SettingDescriptor,
) -> SettingValue {
    source
        .get(&descriptor.name)
        .and_then(|stored| descriptor.value_type.coerce(stored.value()).ok())
        .unwrap_or_else(|| descriptor.value.clone())
}
