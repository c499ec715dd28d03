use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    /// Jump to a navigation entry (0-based)
    SelectPage(usize),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Tab, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::NextPage,
        (KeyCode::Char(c), _) if c.is_ascii_digit() && c != '0' => {
            Action::SelectPage(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}
