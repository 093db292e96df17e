use crossterm::event::{KeyCode as CtKeyCode, KeyEvent as CtKeyEvent, KeyModifiers as CtModifiers};
use hubview_core::{
    action::Action,
    config::{Command, KeysConfig},
    keyboard::{KeyCode, KeyEvent, KeyModifiers},
    state::{AppState, Mode},
};

/// Convert a crossterm key event into the core representation.
/// Returns `None` for keys that can never be bound (media keys, bare modifiers...).
pub fn from_crossterm(key: CtKeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Esc,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        CtKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };

    let mut modifiers = KeyModifiers::NONE;
    if key.modifiers.contains(CtModifiers::CONTROL) {
        modifiers |= KeyModifiers::CONTROL;
    }
    if key.modifiers.contains(CtModifiers::ALT) {
        modifiers |= KeyModifiers::ALT;
    }
    // Shift is already folded into the character for printable keys
    if key.modifiers.contains(CtModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)) {
        modifiers |= KeyModifiers::SHIFT;
    }

    Some(KeyEvent::new(code, modifiers))
}

fn command_to_action(command: &Command) -> Option<Action> {
    let action = match command {
        Command::Noop => return None,
        Command::Quit => Action::Quit,
        Command::ShowHelp => Action::ShowHelp,
        Command::Refetch => Action::Refetch,
        Command::Submit => Action::Submit,
        Command::MoveUp => Action::MoveSelection(-1),
        Command::MoveDown => Action::MoveSelection(1),
        Command::MoveTop => Action::MoveTop,
        Command::MoveBottom => Action::MoveBottom,
        Command::OpenIssue => Action::OpenIssue,
        Command::DeleteBackwardChar => Action::InputPop,
        Command::DeleteForwardChar => Action::InputDeleteForward,
        Command::DeleteBackwardWord => Action::InputDeleteWord,
        Command::DeleteToStart => Action::InputDeleteToStart,
        Command::MoveCursorLeft => Action::CursorLeft,
        Command::MoveCursorRight => Action::CursorRight,
        Command::MoveCursorStart => Action::CursorStart,
        Command::MoveCursorEnd => Action::CursorEnd,
        Command::Cancel => Action::CloseOverlay,
    };
    Some(action)
}

/// Resolve a key event into an Action based on current mode
pub fn resolve_action(key: CtKeyEvent, state: &AppState, keys: &KeysConfig) -> Option<Action> {
    let key = from_crossterm(key)?;
    let keymap = keys.keymap_for_mode(&state.mode);

    if let Some(command) = keymap.get(&key) {
        return command_to_action(command);
    }

    // Unbound printable characters go into the path field
    match (state.mode, key.code) {
        (Mode::Form, KeyCode::Char(c))
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::InputPush(c))
        }
        _ => None,
    }
}
