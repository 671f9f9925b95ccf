//! Number input key handling

use crossterm::event::{KeyCode, KeyEvent};

use super::NumberInputState;

/// What a key press did to a number input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberInputEvent {
    /// Value was stepped up; carries the new scaled value
    Incremented(i128),
    /// Value was stepped down; carries the new scaled value
    Decremented(i128),
    /// Typed text was confirmed and still needs conversion
    Submitted(String),
    StartedEditing,
    /// The edit buffer changed
    Typed,
    CancelledEditing,
}

impl NumberInputState {
    /// Handle a key press.
    ///
    /// While editing, typed characters go to the edit buffer and Enter
    /// submits it. Otherwise arrows and `+`/`-` step the value, Enter starts
    /// editing from the current value and a digit starts editing from scratch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<NumberInputEvent> {
        if self.editing() {
            return self.handle_editing_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => {
                self.increment();
                Some(NumberInputEvent::Incremented(self.value))
            }
            KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => {
                self.decrement();
                Some(NumberInputEvent::Decremented(self.value))
            }
            KeyCode::Enter => {
                self.start_editing();
                Some(NumberInputEvent::StartedEditing)
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.editor = Some(c.to_string());
                Some(NumberInputEvent::StartedEditing)
            }
            _ => None,
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<NumberInputEvent> {
        match key.code {
            KeyCode::Enter => self.take_edit().map(NumberInputEvent::Submitted),
            KeyCode::Esc => {
                self.cancel_editing();
                Some(NumberInputEvent::CancelledEditing)
            }
            KeyCode::Backspace => {
                self.backspace();
                Some(NumberInputEvent::Typed)
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
                Some(NumberInputEvent::Typed)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_arrow_keys_step() {
        let mut state = NumberInputState::new("Retries", 0, 10, 0).with_value(5);
        assert_eq!(state.handle_key(key(KeyCode::Up)), Some(NumberInputEvent::Incremented(6)));
        assert_eq!(state.handle_key(key(KeyCode::Down)), Some(NumberInputEvent::Decremented(5)));
    }

    #[test]
    fn test_typed_text_is_submitted_unconverted() {
        let mut state = NumberInputState::new("Retries", 0, 10, 0).with_value(5);
        state.handle_key(key(KeyCode::Enter));
        state.handle_key(key(KeyCode::Backspace));
        state.handle_key(key(KeyCode::Char('7')));

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(NumberInputEvent::Submitted("7".to_string()))
        );
        // The value only changes once the binding accepts the text
        assert_eq!(state.value, 5);
    }

    #[test]
    fn test_digit_starts_fresh_edit() {
        let mut state = NumberInputState::new("Retries", 0, 100, 0).with_value(5);
        assert_eq!(
            state.handle_key(key(KeyCode::Char('4'))),
            Some(NumberInputEvent::StartedEditing)
        );
        state.handle_key(key(KeyCode::Char('2')));
        assert_eq!(state.take_edit(), Some("42".to_string()));
    }

    #[test]
    fn test_escape_cancels_editing() {
        let mut state = NumberInputState::new("Retries", 0, 10, 0);
        state.start_editing();
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            Some(NumberInputEvent::CancelledEditing)
        );
        assert!(!state.editing());
    }
}
