//! Context-aware keybindings with string key parsing
//!
//! Bindings map a command name to a list of key strings ("down", "ctrl+u",
//! "space"). They are grouped by a context (for the combobox: whether the
//! dropdown is open), with a global table consulted as the fallback.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

/// Trait for keybinding contexts
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// pub enum ListContext {
///     Browsing,
///     Filtering,
/// }
/// ```
pub trait BindingContext: Clone + Copy + Eq + Hash {
    /// Get the context name as a string (for config file lookup)
    fn name(&self) -> &'static str;

    /// Parse a context from its name
    fn from_name(name: &str) -> Option<Self>;

    /// Get all possible context values
    fn all() -> &'static [Self];
}

/// Keybindings configuration with context support
#[derive(Debug, Clone)]
pub struct Keybindings<C: BindingContext> {
    /// Global keybindings - checked as fallback for all contexts
    global: HashMap<String, Vec<String>>,
    /// Context-specific keybindings
    contexts: HashMap<C, HashMap<String, Vec<String>>>,
}

impl<C: BindingContext> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingContext> Serialize for Keybindings<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1 + self.contexts.len()))?;
        map.serialize_entry("global", &self.global)?;
        for (context, bindings) in &self.contexts {
            map.serialize_entry(context.name(), bindings)?;
        }
        map.end()
    }
}

impl<'de, C: BindingContext> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, HashMap<String, Vec<String>>> =
            HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (context_name, bindings) in raw {
            if context_name == "global" {
                keybindings.global = bindings;
            } else if let Some(context) = C::from_name(&context_name) {
                keybindings.contexts.insert(context, bindings);
            }
            // Unknown contexts are ignored so older configs keep loading
        }

        Ok(keybindings)
    }
}

impl<C: BindingContext> Keybindings<C> {
    /// Create a new empty keybindings configuration
    pub fn new() -> Self {
        Self {
            global: HashMap::new(),
            contexts: HashMap::new(),
        }
    }

    /// Add a global keybinding
    pub fn add_global(&mut self, command: impl Into<String>, keys: Vec<String>) {
        self.global.insert(command.into(), keys);
    }

    /// Add a context-specific keybinding
    pub fn add(&mut self, context: C, command: impl Into<String>, keys: Vec<String>) {
        self.contexts
            .entry(context)
            .or_default()
            .insert(command.into(), keys);
    }

    /// Get bindings for a specific context
    pub fn get_context_bindings(&self, context: C) -> Option<&HashMap<String, Vec<String>>> {
        self.contexts.get(&context)
    }

    /// Get command name for a key event in the given context
    ///
    /// First checks context-specific bindings, then falls back to global
    pub fn get_command(&self, key: KeyEvent, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| match_key(key, bindings))
            .or_else(|| match_key(key, &self.global))
    }

    /// Get the first key string bound to a command in the given context
    pub fn get_first_keybinding(&self, command: &str, context: C) -> Option<&str> {
        self.contexts
            .get(&context)
            .and_then(|bindings| bindings.get(command))
            .or_else(|| self.global.get(command))
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    /// Find the first key string that does not parse
    ///
    /// Returns `(command, key)` for the offending entry.
    pub fn find_invalid(&self) -> Option<(&str, &str)> {
        std::iter::once(&self.global)
            .chain(self.contexts.values())
            .flat_map(|bindings| bindings.iter())
            .flat_map(|(command, keys)| keys.iter().map(move |k| (command.as_str(), k.as_str())))
            .find(|(_, key)| parse_key_string(key).is_none())
    }

    /// Merge user config onto defaults - user config overrides defaults
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        defaults.global.extend(user.global);
        for (context, bindings) in user.contexts {
            defaults.contexts.entry(context).or_default().extend(bindings);
        }
        defaults
    }
}

fn match_key(key: KeyEvent, bindings: &HashMap<String, Vec<String>>) -> Option<&str> {
    bindings
        .iter()
        .find(|(_, keys)| {
            keys.iter()
                .filter_map(|k| parse_key_string(k))
                .any(|parsed| key_matches(&parsed, &key))
        })
        .map(|(command, _)| command.as_str())
}

/// Compare code and modifiers, ignoring kind and state
///
/// Character keys compare case-insensitively, and SHIFT is ignored on them
/// because terminals report it inconsistently for printable characters.
fn key_matches(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    match (parsed.code, key.code) {
        (KeyCode::Char(c1), KeyCode::Char(c2)) => {
            c1.to_lowercase().eq(c2.to_lowercase())
                && parsed.modifiers.difference(KeyModifiers::SHIFT)
                    == key.modifiers.difference(KeyModifiers::SHIFT)
        }
        (a, b) => a == b && parsed.modifiers == key.modifiers,
    }
}

/// Parse a key string like "q", "esc", "ctrl+u", "space" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(press(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" alone is a key, not a separator
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, key)) if !key.is_empty() => (Some(mods), key),
        _ => (None, key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(press(code, modifiers))
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Format a key string for display (e.g., "ctrl+u" -> "^U", "down" -> "Down")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.to_string();
    };

    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code != KeyCode::BackTab {
        out.push_str("Shift+");
    }

    let name = match key.code {
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        other => format!("{:?}", other),
    };
    out.push_str(&name);
    out
}
