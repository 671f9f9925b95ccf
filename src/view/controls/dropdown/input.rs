//! Dropdown key handling

use crossterm::event::{KeyCode, KeyEvent};

use super::{DropdownState, FocusState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    Opened,
    /// An option was picked; the list is closed
    Selected(usize),
    /// The highlighted option moved while the list is open
    Highlighted(usize),
    /// The list closed and the earlier selection was restored
    Cancelled,
}

impl DropdownState {
    /// Handle a key press.
    ///
    /// Closing the list with Enter reports `Selected`, which is when the
    /// value should be committed. While open, a letter jumps to the next
    /// option starting with it, which keeps long font lists usable.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DropdownEvent> {
        if self.focus != FocusState::Focused && !self.open {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.open {
                    self.confirm();
                    Some(DropdownEvent::Selected(self.selected))
                } else {
                    self.toggle_open();
                    Some(DropdownEvent::Opened)
                }
            }
            KeyCode::Esc if self.open => {
                self.cancel();
                Some(DropdownEvent::Cancelled)
            }
            KeyCode::Up if self.open => {
                self.select_prev();
                Some(DropdownEvent::Highlighted(self.selected))
            }
            KeyCode::Down if self.open => {
                self.select_next();
                Some(DropdownEvent::Highlighted(self.selected))
            }
            KeyCode::Char(c) if self.open => {
                let index = self.next_starting_with(c)?;
                self.selected = index;
                self.ensure_visible();
                Some(DropdownEvent::Highlighted(index))
            }
            _ => None,
        }
    }

    /// First option after the selection whose name starts with `c`,
    /// wrapping around
    fn next_starting_with(&self, c: char) -> Option<usize> {
        let len = self.options.len();
        (1..=len)
            .map(|offset| (self.selected + offset) % len)
            .find(|&i| {
                self.options[i]
                    .chars()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(&c))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn fonts() -> DropdownState {
        DropdownState::new(
            ["Arial", "Consolas", "Courier New", "Segoe UI"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            "Font",
        )
        .with_focus(FocusState::Focused)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_keyboard_pick() {
        let mut state = fonts();

        assert_eq!(state.handle_key(key(KeyCode::Enter)), Some(DropdownEvent::Opened));
        assert_eq!(state.handle_key(key(KeyCode::Down)), Some(DropdownEvent::Highlighted(1)));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), Some(DropdownEvent::Selected(1)));
        assert!(!state.open);
    }

    #[test]
    fn test_letters_jump_between_matches() {
        let mut state = fonts();
        state.toggle_open();

        assert_eq!(state.handle_key(key(KeyCode::Char('c'))), Some(DropdownEvent::Highlighted(1)));
        assert_eq!(state.handle_key(key(KeyCode::Char('C'))), Some(DropdownEvent::Highlighted(2)));
        assert_eq!(state.handle_key(key(KeyCode::Char('c'))), Some(DropdownEvent::Highlighted(1)));
        assert_eq!(state.handle_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_arrows_ignored_when_closed() {
        let mut state = fonts();
        assert!(state.handle_key(key(KeyCode::Down)).is_none());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_escape_restores() {
        let mut state = fonts();
        state.toggle_open();
        state.select_next();

        assert_eq!(state.handle_key(key(KeyCode::Esc)), Some(DropdownEvent::Cancelled));
        assert_eq!(state.selected, 0);
    }
}
