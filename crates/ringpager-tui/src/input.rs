use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Swipe toward the previous page
    SwipeLeft,
    /// Swipe toward the next page
    SwipeRight,
    /// Jump to a page by number
    GoTo(usize),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::SwipeLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::SwipeRight,

        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::GoTo(0),
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoTo(c as usize - '1' as usize)
        }

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_swipe_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('h'))), Action::SwipeLeft);
        assert_eq!(handle_key_event(key(KeyCode::Left)), Action::SwipeLeft);
        assert_eq!(handle_key_event(key(KeyCode::Char('l'))), Action::SwipeRight);
        assert_eq!(handle_key_event(key(KeyCode::Right)), Action::SwipeRight);
    }

    #[test]
    fn test_quit_and_goto() {
        assert_eq!(handle_key_event(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('3'))), Action::GoTo(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('g'))), Action::GoTo(0));
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), Action::None);
    }
}
