//! Toggle key handling

use crossterm::event::{KeyCode, KeyEvent};

use super::{FocusState, ToggleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// The value changed to this
    Changed(bool),
}

impl ToggleState {
    /// Space or Enter flips the value; `y`/`t` and `n`/`f` set it, the same
    /// words a boolean setting accepts as text
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ToggleEvent> {
        if self.focus != FocusState::Focused {
            return None;
        }

        let changed = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                true
            }
            KeyCode::Char('y' | 'Y' | 't' | 'T') => self.set(true),
            KeyCode::Char('n' | 'N' | 'f' | 'F') => self.set(false),
            _ => false,
        };
        changed.then_some(ToggleEvent::Changed(self.checked))
    }
}
