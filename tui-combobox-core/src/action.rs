//! Action trait for values emitted by components

use std::fmt::Debug;

/// Marker trait for actions a component can emit and a store can dispatch
///
/// Widgets never mutate application state directly. A committed selection
/// leaves the widget as an action built by one of the caller's callbacks
/// (a form-store replacement or a plain value change), and the caller's
/// store applies it.
///
/// Actions should be:
/// - Clone: they may be logged, replayed, or fanned out to several handlers
/// - Debug: for logging
/// - Send + 'static: so they can cross the event-poller channel
///
/// Use `#[derive(Action)]` from `tui-combobox-macros` to implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}
