use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::state::Mode;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Commands that can be bound to keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,

    // General commands
    Quit,
    ShowHelp,
    Refetch,

    // Form commands
    Submit,

    // Issue list commands
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    OpenIssue,

    // Text-edit commands
    DeleteBackwardChar,
    DeleteForwardChar,
    DeleteBackwardWord,
    DeleteToStart,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorStart,
    MoveCursorEnd,

    // Overlay commands
    Cancel,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "noop" | "none" | "unbound" => Ok(Command::Noop),
            "quit" => Ok(Command::Quit),
            "show_help" => Ok(Command::ShowHelp),
            "refetch" => Ok(Command::Refetch),
            "submit" => Ok(Command::Submit),
            "move_up" => Ok(Command::MoveUp),
            "move_down" => Ok(Command::MoveDown),
            "move_top" => Ok(Command::MoveTop),
            "move_bottom" => Ok(Command::MoveBottom),
            "open_issue" => Ok(Command::OpenIssue),
            "delete_backward_char" => Ok(Command::DeleteBackwardChar),
            "delete_forward_char" => Ok(Command::DeleteForwardChar),
            "delete_backward_word" => Ok(Command::DeleteBackwardWord),
            "delete_to_start" => Ok(Command::DeleteToStart),
            "move_cursor_left" => Ok(Command::MoveCursorLeft),
            "move_cursor_right" => Ok(Command::MoveCursorRight),
            "move_cursor_start" => Ok(Command::MoveCursorStart),
            "move_cursor_end" => Ok(Command::MoveCursorEnd),
            "cancel" => Ok(Command::Cancel),
            _ => Err(format!("Unknown command: {s}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Command::Noop => "noop",
            Command::Quit => "quit",
            Command::ShowHelp => "show_help",
            Command::Refetch => "refetch",
            Command::Submit => "submit",
            Command::MoveUp => "move_up",
            Command::MoveDown => "move_down",
            Command::MoveTop => "move_top",
            Command::MoveBottom => "move_bottom",
            Command::OpenIssue => "open_issue",
            Command::DeleteBackwardChar => "delete_backward_char",
            Command::DeleteForwardChar => "delete_forward_char",
            Command::DeleteBackwardWord => "delete_backward_word",
            Command::DeleteToStart => "delete_to_start",
            Command::MoveCursorLeft => "move_cursor_left",
            Command::MoveCursorRight => "move_cursor_right",
            Command::MoveCursorStart => "move_cursor_start",
            Command::MoveCursorEnd => "move_cursor_end",
            Command::Cancel => "cancel",
        };
        write!(f, "{s}")
    }
}

impl Command {
    /// Get a human-readable description of the command for help display
    pub fn description(&self) -> &'static str {
        match self {
            Command::Noop => "Unbound",
            Command::Quit => "Quit the application",
            Command::ShowHelp => "Show help",
            Command::Refetch => "Fetch the last submitted path again",
            Command::Submit => "Search",
            Command::MoveUp => "Previous issue",
            Command::MoveDown => "Next issue",
            Command::MoveTop => "First issue",
            Command::MoveBottom => "Last issue",
            Command::OpenIssue => "Open selected issue in browser",
            Command::DeleteBackwardChar => "Delete backward char",
            Command::DeleteForwardChar => "Delete forward char",
            Command::DeleteBackwardWord => "Delete backward word",
            Command::DeleteToStart => "Delete to start of input",
            Command::MoveCursorLeft => "Move cursor left",
            Command::MoveCursorRight => "Move cursor right",
            Command::MoveCursorStart => "Move cursor to start",
            Command::MoveCursorEnd => "Move cursor to end",
            Command::Cancel => "Close",
        }
    }
}

/// Key bindings for a specific layer/mode
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Complete key binding configuration, composed from reusable layers.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub text_edit: KeyMap,
    pub issue_list: KeyMap,
    pub overlay: KeyMap,
}

/// Intermediate structure for deserializing key bindings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    text_edit: HashMap<String, String>,
    #[serde(default)]
    issue_list: HashMap<String, String>,
    #[serde(default)]
    overlay: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            text_edit: Self::default_text_edit(),
            issue_list: Self::default_issue_list(),
            overlay: Self::default_overlay(),
        }
    }

    /// Build the effective keymap for a given app mode using precedence:
    /// general < shared layers < mode-specific
    pub fn keymap_for_mode(&self, mode: &Mode) -> KeyMap {
        let mut combined = KeyMap::new();
        Self::apply_layer(&mut combined, &self.general);

        match mode {
            Mode::Form => {
                Self::apply_layer(&mut combined, &self.text_edit);
                Self::apply_layer(&mut combined, &self.issue_list);
            }
            Mode::Help => {
                Self::apply_layer(&mut combined, &self.overlay);
            }
        }

        combined
    }

    /// Find the first key bound to a given command in a keymap.
    pub fn find_key(keymap: &KeyMap, command: &Command) -> Option<KeyEvent> {
        // Prefer shorter/simpler key representations
        let mut found: Vec<_> = keymap
            .iter()
            .filter(|(_, cmd)| *cmd == command)
            .map(|(key, _)| *key)
            .collect();
        found.sort();
        found.into_iter().next()
    }

    /// Bindings of a keymap grouped for display, sorted by command then key.
    pub fn rows(keymap: &KeyMap) -> Vec<(KeyEvent, Command)> {
        let mut rows: Vec<(KeyEvent, Command)> = keymap
            .iter()
            .map(|(key, command)| (*key, command.clone()))
            .collect();
        rows.sort_by(|a, b| {
            a.1.description()
                .cmp(b.1.description())
                .then_with(|| a.0.cmp(&b.0))
        });
        rows
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, command.clone());
            }
        }
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        map.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit,
        );
        map.insert(
            KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE),
            Command::ShowHelp,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL),
            Command::ShowHelp,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Command::Refetch,
        );
        map
    }

    fn default_text_edit() -> KeyMap {
        let mut map = KeyMap::new();
        map.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Command::Submit,
        );
        map.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            Command::Quit,
        );
        map.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            Command::DeleteBackwardChar,
        );
        map.insert(
            KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE),
            Command::DeleteForwardChar,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
            Command::DeleteBackwardWord,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            Command::DeleteToStart,
        );
        map.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            Command::MoveCursorLeft,
        );
        map.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            Command::MoveCursorRight,
        );
        map.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            Command::MoveCursorStart,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
            Command::MoveCursorStart,
        );
        map.insert(
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            Command::MoveCursorEnd,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL),
            Command::MoveCursorEnd,
        );
        map
    }

    fn default_issue_list() -> KeyMap {
        let mut map = KeyMap::new();
        map.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            Command::MoveUp,
        );
        map.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            Command::MoveDown,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
            Command::MoveUp,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Command::MoveDown,
        );
        map.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            Command::MoveTop,
        );
        map.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            Command::MoveBottom,
        );
        map.insert(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
            Command::OpenIssue,
        );
        map
    }

    fn default_overlay() -> KeyMap {
        let mut map = KeyMap::new();
        map.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            Command::Cancel,
        );
        map.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            Command::Cancel,
        );
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();

        config.general.extend(Self::parse_keymap(&raw.general)?);
        config.text_edit.extend(Self::parse_keymap(&raw.text_edit)?);
        config.issue_list.extend(Self::parse_keymap(&raw.issue_list)?);
        config.overlay.extend(Self::parse_keymap(&raw.overlay)?);

        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
