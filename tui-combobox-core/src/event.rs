//! Event types delivered to components

use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;

/// The event payload handed to `Component::handle_event`
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click/move event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick, used to expire deferred work
    Tick,
    /// Keyboard focus moved onto the component
    Focus,
    /// Keyboard focus left the component
    ///
    /// `target` is the cell that received focus when the caller knows it
    /// (a mouse press elsewhere), `None` when it does not (Tab, programmatic
    /// focus changes).
    Blur { target: Option<(u16, u16)> },
}

impl EventKind {
    /// Check if this is a global event (should be delivered to every component)
    pub fn is_global(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                use crossterm::event::KeyCode;
                key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
            }
            EventKind::Resize(_, _) | EventKind::Tick => true,
            _ => false,
        }
    }

    /// Screen position of a pointer event, if this is one
    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(mouse) => Some((mouse.column, mouse.row)),
            EventKind::Scroll { column, row, .. } => Some((*column, *row)),
            _ => None,
        }
    }
}

/// Check if a cell lies within an area
pub fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseEventKind, MouseButton};

    #[test]
    fn test_rect_contains_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(rect_contains(area, 2, 3));
        assert!(rect_contains(area, 5, 4));
        assert!(!rect_contains(area, 6, 4));
        assert!(!rect_contains(area, 5, 5));
        assert!(!rect_contains(area, 1, 3));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!rect_contains(Rect::default(), 0, 0));
    }

    #[test]
    fn test_position() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 9,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(EventKind::Mouse(mouse).position(), Some((7, 9)));
        assert_eq!(EventKind::Tick.position(), None);
        assert_eq!(EventKind::Blur { target: Some((1, 1)) }.position(), None);
    }

    #[test]
    fn test_is_global() {
        assert!(EventKind::Tick.is_global());
        assert!(EventKind::Resize(80, 24).is_global());
        assert!(!EventKind::Focus.is_global());
    }
}
