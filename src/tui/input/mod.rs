use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::focus::{Command, Focus};

/// Translate a key press into a command for the current focus.
/// Returns `None` for keys with no meaning in that focus.
pub fn translate(key: KeyEvent, focus: &Focus) -> Option<Command> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }

    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit);
        }
        (m, KeyCode::Char('l')) if m.contains(KeyModifiers::CONTROL) => {
            return Some(Command::RedrawAll);
        }
        _ => {}
    }

    match focus {
        Focus::EnteringNew => translate_entry(key),
        Focus::Navigating => translate_list(key),
        Focus::Renaming { .. } => translate_rename(key),
    }
}

fn translate_entry(key: KeyEvent) -> Option<Command> {
    Some(match key.code {
        KeyCode::Tab | KeyCode::Esc => Command::SwitchFocus,
        KeyCode::Enter => Command::Submit,
        _ => Command::TextKey(key),
    })
}

fn translate_rename(key: KeyEvent) -> Option<Command> {
    Some(match key.code {
        KeyCode::Enter => Command::Submit,
        KeyCode::Esc => Command::Cancel,
        _ => Command::TextKey(key),
    })
}

fn translate_list(key: KeyEvent) -> Option<Command> {
    let command = match (key.modifiers, key.code) {
        (m, KeyCode::Char('d')) if m.contains(KeyModifiers::CONTROL) => Command::HalfPageDown,
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => Command::HalfPageUp,
        (m, _) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => return None,
        (_, KeyCode::Tab) => Command::SwitchFocus,
        (_, KeyCode::Down | KeyCode::Char('j')) => Command::MoveDown,
        (_, KeyCode::Up | KeyCode::Char('k')) => Command::MoveUp,
        (_, KeyCode::PageDown) => Command::PageDown,
        (_, KeyCode::PageUp) => Command::PageUp,
        (_, KeyCode::Enter | KeyCode::Char(' ')) => Command::Toggle,
        (_, KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('d')) => Command::Delete,
        (_, KeyCode::Char('e')) => Command::Edit,
        (_, KeyCode::Char('m')) => Command::CompleteAll,
        (_, KeyCode::Char('c')) => Command::ClearCompleted,
        _ => return None,
    };
    Some(command)
}
