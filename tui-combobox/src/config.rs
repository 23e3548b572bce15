//! Combobox configuration loaded from JSON

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use tui_combobox_core::Keybindings;

use crate::keymap::{default_keybindings, ComboboxContext};
use crate::placement::DropdownMetrics;

/// Failure to load a configuration file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The contents are not a valid configuration
    Parse(serde_json::Error),
    /// A key string in `keys` does not parse
    InvalidKey { command: String, key: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::InvalidKey { command, key } => {
                write!(f, "invalid key {key:?} bound to {command:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::InvalidKey { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Tunables for a [`Combobox`](crate::Combobox)
///
/// Every field is optional in JSON. Key bindings given in `keys` are merged
/// over the defaults, so a file only needs the commands it changes:
///
/// ```json
/// {
///   "blur_debounce_ms": 150,
///   "metrics": { "max_height": 8 },
///   "keys": { "open": { "next": ["down", "ctrl+n"] } }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    pub metrics: DropdownMetrics,
    /// Grace period before a blur with an unknown target closes the dropdown
    pub blur_debounce_ms: u64,
    #[serde(deserialize_with = "merge_with_default_keys")]
    pub keys: Keybindings<ComboboxContext>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            metrics: DropdownMetrics::default(),
            blur_debounce_ms: 100,
            keys: default_keybindings(),
        }
    }
}

fn merge_with_default_keys<'de, D>(deserializer: D) -> Result<Keybindings<ComboboxContext>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = Keybindings::deserialize(deserializer)?;
    Ok(Keybindings::merge(default_keybindings(), user))
}

impl ComboboxConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ComboboxConfig = serde_json::from_str(json)?;
        if let Some((command, key)) = config.keys.find_invalid() {
            return Err(ConfigError::InvalidKey {
                command: command.to_string(),
                key: key.to_string(),
            });
        }
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn blur_debounce(&self) -> Duration {
        Duration::from_millis(self.blur_debounce_ms)
    }
}
