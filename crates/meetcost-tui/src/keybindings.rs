//! Custom keybindings system for the meetcost TUI
//!
//! Supports:
//! - Customizable keybindings via config.json
//! - Modifier keys: Ctrl, Shift, Alt, Cmd
//! - Standard keys: a-z, 0-9, symbols, F1-F12, Space, Enter, Esc, etc.
//! - Fallback to defaults if custom bindings missing or malformed
//! - Reverse lookup for help modal display

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

/// Actions that can be triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Quit application (asks first if the meeting is running)
    Quit,
    /// Force quit without confirmation
    ForceQuit,
    /// Start or stop the meeting clock
    ToggleTimer,
    /// One more attendee
    AddAttendee,
    /// One fewer attendee
    RemoveAttendee,
    /// Clear the meeting (with confirmation)
    Reset,
    /// Edit the billable rate
    EditRate,
    /// Toggle color scheme (Dark/Light)
    ThemeToggle,
    /// Toggle help modal
    ToggleHelp,
    /// Close current modal/dialog
    CloseModal,
}

impl KeyAction {
    /// Get all possible actions
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::ToggleTimer,
            KeyAction::AddAttendee,
            KeyAction::RemoveAttendee,
            KeyAction::EditRate,
            KeyAction::Reset,
            KeyAction::ThemeToggle,
            KeyAction::ToggleHelp,
            KeyAction::CloseModal,
            KeyAction::Quit,
            KeyAction::ForceQuit,
        ]
    }

    /// Get action name for config.json
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::Quit => "quit",
            KeyAction::ForceQuit => "force_quit",
            KeyAction::ToggleTimer => "toggle_timer",
            KeyAction::AddAttendee => "add_attendee",
            KeyAction::RemoveAttendee => "remove_attendee",
            KeyAction::Reset => "reset",
            KeyAction::EditRate => "edit_rate",
            KeyAction::ThemeToggle => "theme_toggle",
            KeyAction::ToggleHelp => "toggle_help",
            KeyAction::CloseModal => "close_modal",
        }
    }

    /// Get human-readable description for help modal
    pub fn description(&self) -> &'static str {
        match self {
            KeyAction::Quit => "Quit application",
            KeyAction::ForceQuit => "Force quit without confirmation",
            KeyAction::ToggleTimer => "Start / stop the meeting",
            KeyAction::AddAttendee => "Add an attendee",
            KeyAction::RemoveAttendee => "Remove an attendee",
            KeyAction::Reset => "Clear the meeting",
            KeyAction::EditRate => "Edit billable rate",
            KeyAction::ThemeToggle => "Toggle theme (Dark/Light)",
            KeyAction::ToggleHelp => "Toggle help modal",
            KeyAction::CloseModal => "Close modal/dialog",
        }
    }

    /// Parse action from string (from config.json)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        KeyAction::all().iter().copied().find(|a| a.name() == name)
    }
}

/// Key with modifiers for lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeyWithMods {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyWithMods {
    fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

/// Keybindings system
pub struct KeyBindings {
    /// Default keybindings (immutable)
    defaults: HashMap<KeyWithMods, KeyAction>,
    /// Custom keybindings from config.json (override defaults)
    custom: HashMap<KeyWithMods, KeyAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create new keybindings with defaults
    pub fn new() -> Self {
        let defaults = HashMap::from([
            (KeyWithMods::plain(KeyCode::Char('q')), KeyAction::Quit),
            (KeyWithMods::ctrl('q'), KeyAction::ForceQuit),
            (KeyWithMods::ctrl('c'), KeyAction::ForceQuit),
            (KeyWithMods::plain(KeyCode::Char(' ')), KeyAction::ToggleTimer),
            (KeyWithMods::plain(KeyCode::Char('s')), KeyAction::ToggleTimer),
            (KeyWithMods::plain(KeyCode::Char('+')), KeyAction::AddAttendee),
            (KeyWithMods::plain(KeyCode::Char('=')), KeyAction::AddAttendee),
            (KeyWithMods::plain(KeyCode::Char('-')), KeyAction::RemoveAttendee),
            (KeyWithMods::plain(KeyCode::Char('c')), KeyAction::Reset),
            (KeyWithMods::plain(KeyCode::Char('r')), KeyAction::EditRate),
            (KeyWithMods::plain(KeyCode::Char('t')), KeyAction::ThemeToggle),
            (KeyWithMods::plain(KeyCode::Char('?')), KeyAction::ToggleHelp),
            (KeyWithMods::plain(KeyCode::Esc), KeyAction::CloseModal),
        ]);

        Self {
            defaults,
            custom: HashMap::new(),
        }
    }

    /// Load custom keybindings from config.json
    ///
    /// Format: `{"keybindings": {"Ctrl+R": "reset", "F2": "edit_rate", ...}}`
    ///
    /// Returns a warning for every entry that could not be applied.
    pub fn load_custom(&mut self, keybindings: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (key_str, action_str) in keybindings {
            let key_with_mods = match parse_key(key_str) {
                Ok(k) => k,
                Err(e) => {
                    warn!(key = %key_str, error = %e, "Failed to parse keybinding");
                    warnings.push(format!("Bad keybinding '{}': {}", key_str, e));
                    continue;
                }
            };

            let action = match KeyAction::from_name(action_str) {
                Some(a) => a,
                None => {
                    warn!(key = %key_str, action = %action_str, "Unknown keybinding action");
                    warnings.push(format!(
                        "Unknown action '{}' for key '{}'",
                        action_str, key_str
                    ));
                    continue;
                }
            };

            self.custom.insert(key_with_mods, action);
        }

        warnings
    }

    /// Get action for a key press
    ///
    /// Shifted symbols (`?`, `+`) arrive with SHIFT on some terminals, so a
    /// miss with only SHIFT held retries without it.
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        self.lookup(KeyWithMods { code, modifiers }).or_else(|| {
            if modifiers == KeyModifiers::SHIFT && matches!(code, KeyCode::Char(_)) {
                self.lookup(KeyWithMods::plain(code))
            } else {
                None
            }
        })
    }

    fn lookup(&self, key: KeyWithMods) -> Option<KeyAction> {
        // Custom bindings take precedence
        if let Some(action) = self.custom.get(&key) {
            return Some(*action);
        }
        self.defaults.get(&key).copied()
    }

    /// All key strings bound to an action, sorted for stable display
    ///
    /// Custom bindings hide any default key they rebind.
    pub fn keys_for_action(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .custom
            .iter()
            .chain(
                self.defaults
                    .iter()
                    .filter(|(key, _)| !self.custom.contains_key(key)),
            )
            .filter(|(_, act)| **act == action)
            .map(|(key, _)| format_key(key.code, key.modifiers))
            .collect();
        keys.sort();
        keys
    }

    /// Get key string for an action (for status bar hints)
    pub fn get_key_for_action(&self, action: KeyAction) -> Option<String> {
        self.keys_for_action(action).into_iter().next()
    }
}

/// Parse key string from config.json
///
/// Examples:
/// - "Ctrl+Q" → KeyCode::Char('q') + CONTROL
/// - "F5" → KeyCode::F(5)
/// - "Space" → KeyCode::Char(' ')
/// - "+" or "plus" → KeyCode::Char('+')
fn parse_key(s: &str) -> Result<KeyWithMods, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty key string".to_string());
    }
    if s == "+" {
        return Ok(KeyWithMods::plain(KeyCode::Char('+')));
    }

    let parts: Vec<String> = s.split('+').map(|p| p.trim().to_lowercase()).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(format!("Malformed key string: {}", s));
    }

    // Parse modifiers
    let mut modifiers = KeyModifiers::NONE;
    let (key_part, modifier_parts) = parts
        .split_last()
        .ok_or_else(|| "Empty key string".to_string())?;
    for modifier in modifier_parts {
        match modifier.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            "cmd" | "meta" => {
                // Map to SUPER on macOS, CONTROL elsewhere
                #[cfg(target_os = "macos")]
                {
                    modifiers |= KeyModifiers::SUPER;
                }
                #[cfg(not(target_os = "macos"))]
                {
                    modifiers |= KeyModifiers::CONTROL;
                }
            }
            _ => return Err(format!("Unknown modifier: {}", modifier)),
        }
    }

    // Parse key
    let code = match key_part.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,

        // Function keys
        k if k.len() > 1 && k.starts_with('f') => {
            let num: u8 = k[1..]
                .parse()
                .map_err(|_| format!("Invalid F-key: {}", k))?;
            if !(1..=12).contains(&num) {
                return Err(format!("F-key out of range (1-12): F{}", num));
            }
            KeyCode::F(num)
        }

        // Single character
        k => {
            let mut chars = k.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(format!("Unknown key: {}", key_part)),
            }
        }
    };

    Ok(KeyWithMods { code, modifiers })
}

/// Format key for display in help modal
fn format_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SUPER) {
        #[cfg(target_os = "macos")]
        parts.push("Cmd".to_string());
        #[cfg(not(target_os = "macos"))]
        parts.push("Win".to_string());
    }

    let key_str = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => "Unknown".to_string(),
    };

    parts.push(key_str);
    parts.join("+")
}
