use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    PrevSection,
    NextSection,
    Submit,
    Backspace,
    Up,
    Down,
    Input(char),
    None,
}

/// Maps raw key events to app actions. Plain characters stay available for
/// text entry, so quitting is Ctrl+C only.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
        return AppAction::None;
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Left => AppAction::PrevSection,
        KeyCode::Right => AppAction::NextSection,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
