//! Text input key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{FocusState, TextInputState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// The buffer changed; nothing is committed yet
    Edited,
    /// Enter pressed; carries the buffer to commit
    Submitted(String),
    /// Escape pressed; the owner restores the stored text
    Cancelled,
}

impl TextInputState {
    /// Handle a key press while focused. Cursor movement is consumed
    /// silently.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TextInputEvent> {
        if self.focus != FocusState::Focused {
            return None;
        }

        let by_word = key.modifiers.contains(KeyModifiers::CONTROL);
        let before = self.value.len();
        match key.code {
            KeyCode::Enter => return Some(TextInputEvent::Submitted(self.value.clone())),
            KeyCode::Esc => return Some(TextInputEvent::Cancelled),
            KeyCode::Char('u') if by_word => self.set_value(""),
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if by_word => self.move_home(),
            KeyCode::Right if by_word => self.move_end(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
        (self.value.len() != before).then_some(TextInputEvent::Edited)
    }
}
