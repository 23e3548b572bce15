//! Key commands for the two combobox states

use crossterm::event::KeyEvent;
use tui_combobox_core::Keybindings;

use crate::BindingContext;

/// Which command table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BindingContext)]
pub enum ComboboxContext {
    Closed,
    Open,
}

/// Commands the combobox understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Closed: open the dropdown and highlight the first row
    Open,
    /// Open: highlight the next row
    Next,
    /// Open: highlight the previous row
    Prev,
    /// Open: commit the highlighted row
    Commit,
    /// Open: close without committing
    Cancel,
}

impl Command {
    /// Name used in keybinding configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Open => "open",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::Commit => "commit",
            Command::Cancel => "cancel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "open" => Some(Command::Open),
            "next" => Some(Command::Next),
            "prev" => Some(Command::Prev),
            "commit" => Some(Command::Commit),
            "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// Command bound to a key in a context
///
/// Names in the bindings that are not commands resolve to `None`.
pub fn command_for(
    keys: &Keybindings<ComboboxContext>,
    key: KeyEvent,
    context: ComboboxContext,
) -> Option<Command> {
    keys.get_command(key, context).and_then(Command::from_name)
}

/// Default bindings
pub fn default_keybindings() -> Keybindings<ComboboxContext> {
    let mut keys = Keybindings::new();
    keys.add(
        ComboboxContext::Closed,
        Command::Open.as_str(),
        vec!["down".into(), "enter".into(), "space".into()],
    );
    keys.add(ComboboxContext::Open, Command::Next.as_str(), vec!["down".into()]);
    keys.add(ComboboxContext::Open, Command::Prev.as_str(), vec!["up".into()]);
    keys.add(ComboboxContext::Open, Command::Commit.as_str(), vec!["enter".into()]);
    keys.add(ComboboxContext::Open, Command::Cancel.as_str(), vec!["esc".into()]);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_combobox_core::testing::{char_key, key};

    #[test]
    fn test_context_names() {
        assert_eq!(ComboboxContext::Closed.name(), "closed");
        assert_eq!(
            ComboboxContext::from_name("open"),
            Some(ComboboxContext::Open)
        );
        assert_eq!(ComboboxContext::all().len(), 2);
    }

    #[test]
    fn test_defaults_by_context() {
        let keys = default_keybindings();

        for k in ["down", "enter", "space"] {
            assert_eq!(
                command_for(&keys, key(k), ComboboxContext::Closed),
                Some(Command::Open)
            );
        }
        assert_eq!(command_for(&keys, key("up"), ComboboxContext::Closed), None);

        assert_eq!(
            command_for(&keys, key("down"), ComboboxContext::Open),
            Some(Command::Next)
        );
        assert_eq!(
            command_for(&keys, key("esc"), ComboboxContext::Open),
            Some(Command::Cancel)
        );
        // space types into the search while open
        assert_eq!(command_for(&keys, char_key(' '), ComboboxContext::Open), None);
    }

    #[test]
    fn test_unknown_command_name() {
        let mut keys = default_keybindings();
        keys.add(ComboboxContext::Open, "explode", vec!["x".into()]);
        assert_eq!(command_for(&keys, char_key('x'), ComboboxContext::Open), None);
        assert_eq!(Command::from_name("commit"), Some(Command::Commit));
    }
}
