//! Transient interaction state of a combobox

use crate::placement::DropdownPosition;

/// Everything about a combobox that is not the committed value
///
/// `highlighted` is always `None` or an index into the currently filtered
/// list; callers re-validate it with [`InteractionState::revalidate`]
/// whenever that list may have changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub is_open: bool,
    /// Text used to filter the options
    pub search_text: String,
    /// Highlighted row of the filtered list
    pub highlighted: Option<usize>,
    /// Text shown in the input
    pub display_text: String,
    /// Side the dropdown opened on
    pub position: DropdownPosition,
    /// Whether the highlight was last moved by keyboard rather than pointer
    pub keyboard_navigation: bool,
}

impl InteractionState {
    /// Closed state showing `display_text`
    pub fn new(display_text: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            ..Self::default()
        }
    }

    /// Enter the open state
    ///
    /// `highlight_first` highlights row 0 when the list is non-empty.
    pub fn open(&mut self, position: DropdownPosition, highlight_first: bool, len: usize) {
        self.is_open = true;
        self.position = position;
        if highlight_first && len > 0 {
            self.highlighted = Some(0);
            self.keyboard_navigation = true;
        }
        self.revalidate(len);
    }

    /// Return to the closed state, showing `display_text`
    pub fn close(&mut self, display_text: impl Into<String>) {
        self.is_open = false;
        self.search_text.clear();
        self.highlighted = None;
        self.keyboard_navigation = false;
        self.display_text = display_text.into();
    }

    /// Replace the typed text; the input shows what is being searched
    pub fn set_search(&mut self, text: String) {
        self.display_text.clone_from(&text);
        self.search_text = text;
    }

    /// Keyboard move to the next row, wrapping at the end
    pub fn highlight_next(&mut self, len: usize) {
        self.highlighted = next_index(self.highlighted, len);
        self.keyboard_navigation = true;
    }

    /// Keyboard move to the previous row, wrapping at the start
    pub fn highlight_prev(&mut self, len: usize) {
        self.highlighted = prev_index(self.highlighted, len);
        self.keyboard_navigation = true;
    }

    /// Pointer moved over a row
    pub fn hover(&mut self, index: usize) {
        self.highlighted = Some(index);
        self.keyboard_navigation = false;
    }

    /// Drop a highlight that no longer points into a list of `len` rows
    pub fn revalidate(&mut self, len: usize) {
        if self.highlighted.is_some_and(|i| i >= len) {
            self.highlighted = None;
        }
    }
}

/// Next index with wraparound; from no highlight, the first row
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Previous index with wraparound; from no highlight, the last row
pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 && i < len => i - 1,
        _ => len - 1,
    })
}
