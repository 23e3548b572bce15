//! Typeahead filtering

use crate::option::SelectOption;

/// The options visible for a search
///
/// With typeahead off, or an empty search, every option is returned.
/// Otherwise options whose label contains the search text, compared
/// case-insensitively, are returned. Order is always preserved.
pub fn filter_options<'a>(
    options: &'a [SelectOption],
    search_text: &str,
    typeahead: bool,
) -> Vec<&'a SelectOption> {
    if !typeahead || search_text.is_empty() {
        return options.iter().collect();
    }

    let needle = search_text.to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .collect()
}

/// Index of the first enabled option in a filtered list
pub fn first_enabled(filtered: &[&SelectOption]) -> Option<usize> {
    filtered.iter().position(|option| !option.disabled)
}
