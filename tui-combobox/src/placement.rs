//! Choosing whether the dropdown opens below or above the input

use ratatui::layout::Rect;
use serde::Deserialize;

/// Where the dropdown is drawn relative to the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropdownPosition {
    #[default]
    Below,
    Above,
}

impl DropdownPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropdownPosition::Below => "below",
            DropdownPosition::Above => "above",
        }
    }
}

/// Sizes used to estimate the dropdown height, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DropdownMetrics {
    /// Height of one option row
    pub row_height: u16,
    /// Vertical padding around the rows (the border)
    pub padding: u16,
    /// Cap on the dropdown height
    pub max_height: u16,
}

impl Default for DropdownMetrics {
    fn default() -> Self {
        Self {
            row_height: 1,
            padding: 2,
            max_height: 10,
        }
    }
}

/// Estimated dropdown height for a number of visible options
///
/// An empty list still shows its "no results" row.
pub fn estimate_dropdown_height(option_count: usize, metrics: &DropdownMetrics) -> u16 {
    let rows = u16::try_from(option_count.max(1)).unwrap_or(u16::MAX);
    rows.saturating_mul(metrics.row_height)
        .saturating_add(metrics.padding)
        .min(metrics.max_height)
}

/// Pick a side for the dropdown
///
/// Opens above only when there is not enough room below and there is
/// enough room above; otherwise below.
pub fn choose_position(
    container: Rect,
    viewport_height: u16,
    estimated_height: u16,
) -> DropdownPosition {
    let space_below = viewport_height.saturating_sub(container.bottom());
    let space_above = container.top();

    if space_below < estimated_height && space_above > estimated_height {
        DropdownPosition::Above
    } else {
        DropdownPosition::Below
    }
}

/// The area the dropdown occupies, clipped to the viewport
pub fn dropdown_area(
    container: Rect,
    viewport: Rect,
    position: DropdownPosition,
    height: u16,
) -> Rect {
    let (y, height) = match position {
        DropdownPosition::Below => {
            let y = container.bottom();
            (y, height.min(viewport.bottom().saturating_sub(y)))
        }
        DropdownPosition::Above => {
            let room = container.top().saturating_sub(viewport.top());
            let height = height.min(room);
            (container.top() - height, height)
        }
    };
    Rect::new(container.x, y, container.width, height)
}
