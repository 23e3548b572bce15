//! Component trait for interactive UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI component that renders from props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL caller-owned data needed for rendering (options,
///    the controlled value, the form record, flags)
/// 2. `handle_event` returns actions, never mutates caller-owned state
/// 3. `render` is a function of props plus the component's own UI state
///
/// Interaction state that belongs to the widget itself (open/closed,
/// highlight, search text, scroll offset, the uncontrolled value) lives in
/// `&mut self`. Anything the caller owns changes only through the returned
/// actions.
///
/// # Focus and geometry
///
/// Components receive the bare `EventKind`. Whether the widget currently has
/// keyboard focus is passed through `Props`; focus *transitions* arrive as
/// `EventKind::Focus` / `EventKind::Blur`. Geometry used for hit-testing and
/// placement is whatever the component recorded during its last `render`.
///
/// # Example
///
/// ```ignore
/// use tui_combobox::{Component, EventKind, Frame, Rect};
///
/// struct Toggle;
///
/// struct ToggleProps {
///     on: bool,
///     is_focused: bool,
/// }
///
/// impl Component<AppAction> for Toggle {
///     type Props<'a> = ToggleProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         if !props.is_focused {
///             return None;
///         }
///         if let EventKind::Key(key) = event {
///             if key.code == KeyCode::Char(' ') {
///                 return Some(AppAction::Toggle(!props.on));
///             }
///         }
///         None
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let text = if props.on { "[x]" } else { "[ ]" };
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
