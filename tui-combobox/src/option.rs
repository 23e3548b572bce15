//! Option entries shown in the dropdown

use serde::{Deserialize, Serialize};

/// One selectable entry
///
/// Options are supplied by the caller on every render and event; the widget
/// never stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value written to the authoritative store on commit
    pub value: String,
    /// Text shown in the input and the list
    pub label: String,
    /// Disabled options are listed but can never be committed
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark this option as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Label of the option carrying `value`, if any
pub fn label_for<'a>(options: &'a [SelectOption], value: &str) -> Option<&'a str> {
    if value.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label.as_str())
}
