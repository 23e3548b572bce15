//! Core traits and types for tui-combobox
//!
//! This crate provides the foundations the combobox widget is built on:
//!
//! - **Action**: values a component emits instead of mutating caller state
//! - **Component**: UI elements that render from props and handle events
//! - **Store**: a reducer-driven state container, used as the form store
//! - **Form context**: a borrowed view of a form record plus its mutation action
//! - **Keybindings**: context-aware key mapping, loadable from JSON
//! - **Event polling**: crossterm events turned into [`EventKind`]
//!
//! # Form binding example
//!
//! ```ignore
//! use tui_combobox_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum FormAction {
//!     Replace(FormData),
//! }
//!
//! fn reducer(state: &mut FormData, action: FormAction) -> bool {
//!     match action {
//!         FormAction::Replace(next) => apply_form_change(state, next),
//!     }
//! }
//!
//! let mut store = Store::new(form_data([("country", ""), ("size", "")]), reducer);
//! let ctx = FormContext::new(store.state(), FormAction::Replace);
//! let action = ctx.set_field("country", "ca");
//! store.dispatch(action);
//! assert_eq!(store.state()["country"], "ca");
//! assert_eq!(store.state()["size"], "");
//! ```

pub mod action;
pub mod bus;
pub mod component;
pub mod event;
pub mod form;
pub mod keybindings;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Event system exports
pub use bus::{process_raw_event, spawn_event_poller, RawEvent};
pub use event::{rect_contains, EventKind};

// Form exports
pub use form::{apply_form_change, form_data, FormContext, FormData};

// Keybindings exports
pub use keybindings::{format_key_for_display, parse_key_string, BindingContext, Keybindings};

// Store exports
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_rect_to_string_plain, buffer_to_string_plain, char_key, ctrl_key, key, mouse_down,
    mouse_move, typed, RenderHarness, TestHarness,
};

#[cfg(feature = "testing-time")]
pub use testing::{advance_time, pause_time, resume_time};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::bus::{process_raw_event, spawn_event_poller, RawEvent};
    pub use crate::component::Component;
    pub use crate::event::{rect_contains, EventKind};
    pub use crate::form::{apply_form_change, form_data, FormContext, FormData};
    pub use crate::keybindings::{
        format_key_for_display, parse_key_string, BindingContext, Keybindings,
    };
    pub use crate::store::{
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
