//! Test utilities for widgets built on tui-combobox-core
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("down")`)
//! - [`mouse_down`] / [`mouse_move`]: pointer events at a cell
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`TestHarness`]: state plus an action channel for handler-style tests
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use tui_combobox::testing::{key, RenderHarness};
//!
//! let mut combobox = Combobox::new();
//! let actions: Vec<Action> = combobox
//!     .handle_event(&EventKind::Key(key("down")), props)
//!     .into_iter()
//!     .collect();
//! assert!(combobox.is_open());
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::Action;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key events for every character of a string, as if typed.
pub fn typed(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// A left-button press at a cell.
pub fn mouse_down(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Pointer movement to a cell.
pub fn mouse_move(column: u16, row: u16) -> EventKind {
    EventKind::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Render into an in-memory terminal.
///
/// ```ignore
/// let mut render = RenderHarness::new(40, 12);
/// let output = render.render_to_string_plain(|frame| {
///     combobox.render(frame, Rect::new(0, 0, 30, 3), props);
/// });
/// assert!(output.contains("Canada"));
/// ```
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a terminal of the given size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal should build");
        Self { terminal }
    }

    /// Render a frame and return the resulting buffer.
    ///
    /// # Panics
    ///
    /// Panics if drawing to the test backend fails.
    pub fn render<F>(&mut self, draw: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(draw).expect("test draw should succeed");
        self.terminal.backend().buffer()
    }

    /// Render a frame and return its text, one line per row, without styles.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    buffer_rect_to_string_plain(buffer, buffer.area)
}

/// Convert a region of a buffer to plain text.
pub fn buffer_rect_to_string_plain(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Generic test harness: state plus an action channel.
///
/// # Example
///
/// ```ignore
/// let mut harness = TestHarness::<FormData, FormAction>::new(form_data([("country", "")]));
/// for action in combobox.handle_event(&event, props) {
///     harness.emit(action);
/// }
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, FormAction::Replace(_));
/// ```
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action from a component's `handle_event` result.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Check if any actions were emitted.
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_emitted().is_empty()
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Pause tokio's clock. Requires the `testing-time` feature.
#[cfg(feature = "testing-time")]
pub fn pause_time() {
    tokio::time::pause();
}

/// Resume tokio's clock. Requires the `testing-time` feature.
#[cfg(feature = "testing-time")]
pub fn resume_time() {
    tokio::time::resume();
}

/// Advance the paused tokio clock. Requires the `testing-time` feature.
#[cfg(feature = "testing-time")]
pub async fn advance_time(duration: std::time::Duration) {
    tokio::time::advance(duration).await;
}

/// Assert that a specific action was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_helpers() {
        assert_eq!(key("down").code, KeyCode::Down);
        assert_eq!(key("space").code, KeyCode::Char(' '));
        assert_eq!(char_key('x').code, KeyCode::Char('x'));
        assert!(ctrl_key('u').modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    #[should_panic(expected = "Invalid key string")]
    fn test_key_invalid_panics() {
        key("arrowdown");
    }

    #[test]
    fn test_typed() {
        let events = typed("ca");
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], EventKind::Key(k) if k.code == KeyCode::Char('a')));
    }

    #[test]
    fn test_mouse_helpers() {
        assert!(matches!(
            mouse_down(4, 2),
            EventKind::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column: 4, row: 2, .. })
        ));
        assert_eq!(mouse_move(1, 9).position(), Some((1, 9)));
    }

    #[test]
    fn test_render_harness_plain() {
        let mut render = RenderHarness::new(10, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert_eq!(output, "hello\n");
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Change(String),
        Blur,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Change(_) => "Change",
                TestAction::Blur => "Blur",
            }
        }
    }

    #[test]
    fn test_harness_emit_and_drain() {
        let mut harness = TestHarness::<(), TestAction>::new(());

        harness.emit_all(vec![TestAction::Change("ca".into()), TestAction::Blur]);

        let actions = harness.drain_emitted();
        assert_eq!(
            actions,
            vec![TestAction::Change("ca".into()), TestAction::Blur]
        );
        assert!(!harness.has_emitted());
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::Change("us".into()), TestAction::Blur];

        assert_emitted!(actions, TestAction::Blur);
        assert_emitted!(actions, TestAction::Change(v) if v == "us");
        assert_not_emitted!(actions, TestAction::Change(v) if v == "ca");

        assert!(find_emitted!(actions, TestAction::Change(_)).is_some());
        assert_eq!(count_emitted!(actions, TestAction::Change(_)), 1);
    }
}
