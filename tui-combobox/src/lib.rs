//! tui-combobox: a filterable select widget for ratatui
//!
//! The [`Combobox`] is a text input with a dropdown of options. With
//! typeahead enabled, typed text filters the options; otherwise the input
//! only displays the selection. The dropdown opens below the input, or above
//! it when the terminal has no room below.
//!
//! The committed value can live in three places, picked per event from the
//! props: a named field of a form record, a controlled `value` owned by the
//! caller, or the widget itself. Commits leave the widget as actions, which
//! the caller dispatches to its store.
//!
//! # Example
//!
//! ```ignore
//! use tui_combobox::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum FormAction {
//!     Replace(FormData),
//! }
//!
//! let options = vec![
//!     SelectOption::new("us", "United States"),
//!     SelectOption::new("ca", "Canada"),
//! ];
//!
//! // In your render function:
//! let form = FormContext::new(store.state(), FormAction::Replace);
//! let props = ComboboxProps::new(&options)
//!     .form(form, "country")
//!     .label("Country")
//!     .typeahead(true)
//!     .focused(true);
//! combobox.render(frame, area, props);
//!
//! // In your event loop:
//! for action in combobox.handle_event(&event, props) {
//!     store.dispatch(action);
//! }
//! ```

// Lets the derive macros name this crate from inside it
extern crate self as tui_combobox;

// Re-export everything from core
pub use tui_combobox_core::*;

// Re-export derive macros
pub use tui_combobox_macros::{Action, BindingContext};

mod combobox;
pub mod config;
pub mod filter;
pub mod icon;
pub mod keymap;
pub mod option;
pub mod placement;
pub mod search_field;
pub mod state;
pub mod value;

pub use combobox::{Combobox, ComboboxProps, DEFAULT_PLACEHOLDER};
pub use config::{ComboboxConfig, ConfigError};
pub use filter::filter_options;
pub use keymap::{default_keybindings, Command, ComboboxContext};
pub use option::SelectOption;
pub use placement::{choose_position, estimate_dropdown_height, DropdownMetrics, DropdownPosition};
pub use state::InteractionState;
pub use value::ValueSource;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_combobox_core::{Action, BindingContext, Component};

    // Widget
    pub use crate::{
        Combobox, ComboboxConfig, ComboboxContext, ComboboxProps, DropdownPosition, SelectOption,
    };

    // Form binding and store
    pub use tui_combobox_core::{
        apply_form_change, form_data, FormContext, FormData, LoggingMiddleware, Middleware,
        Reducer, Store, StoreWithMiddleware,
    };

    // Event system
    pub use tui_combobox_core::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

    // Derive macros
    pub use tui_combobox_macros::{Action, BindingContext};

    // Ratatui re-exports
    pub use tui_combobox_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
