//! The combobox component

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tokio::time::Instant;
use tracing::{debug, trace};
use tui_combobox_core::{rect_contains, Component, EventKind, FormContext};

use crate::config::ComboboxConfig;
use crate::filter::{filter_options, first_enabled};
use crate::icon::trigger_glyph;
use crate::keymap::{command_for, Command, ComboboxContext};
use crate::option::{label_for, SelectOption};
use crate::placement::{
    choose_position, dropdown_area, estimate_dropdown_height, DropdownPosition,
};
use crate::search_field::{Edit, SearchField};
use crate::state::InteractionState;
use crate::value::ValueSource;

/// Placeholder shown when nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

const NO_RESULTS: &str = "No results";

/// Props for [`Combobox`]
///
/// The selection is owned by the form (when `form` and `name` are both
/// set), else by the caller (when `value` is set), else by the widget.
pub struct ComboboxProps<'a, A> {
    /// Options to choose from, in display order
    pub options: &'a [SelectOption],
    /// Field name in the form record
    pub name: Option<&'a str>,
    /// Form the widget is bound to
    pub form: Option<FormContext<'a, A>>,
    /// Controlled selection
    pub value: Option<&'a str>,
    /// Callback for a committed selection (controlled and internal owners)
    pub on_change: Option<fn(String) -> A>,
    /// Text shown when nothing is selected
    pub placeholder: Option<&'a str>,
    pub label: Option<&'a str>,
    /// Marks the label with `*`
    pub required: bool,
    /// Ignore every event and render dimmed
    pub disabled: bool,
    /// Let typed text filter the options
    pub typeahead: bool,
    /// Whether this component has keyboard focus
    pub is_focused: bool,
    /// Action asking the caller to move focus away, emitted when the
    /// trigger closes the dropdown
    pub on_blur_request: Option<fn() -> A>,
}

impl<A> Clone for ComboboxProps<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ComboboxProps<'_, A> {}

impl<'a, A> ComboboxProps<'a, A> {
    /// Unbound, unfocused props over `options`
    pub fn new(options: &'a [SelectOption]) -> Self {
        Self {
            options,
            name: None,
            form: None,
            value: None,
            on_change: None,
            placeholder: None,
            label: None,
            required: false,
            disabled: false,
            typeahead: false,
            is_focused: false,
            on_blur_request: None,
        }
    }

    /// Bind to a named field of a form
    pub fn form(mut self, form: FormContext<'a, A>, name: &'a str) -> Self {
        self.form = Some(form);
        self.name = Some(name);
        self
    }

    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    pub fn on_change(mut self, on_change: fn(String) -> A) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn typeahead(mut self, typeahead: bool) -> Self {
        self.typeahead = typeahead;
        self
    }

    pub fn focused(mut self, is_focused: bool) -> Self {
        self.is_focused = is_focused;
        self
    }

    pub fn on_blur_request(mut self, on_blur_request: fn() -> A) -> Self {
        self.on_blur_request = Some(on_blur_request);
        self
    }

    /// The owner of the selection for these props
    pub fn value_source(&self) -> ValueSource<'a, A> {
        ValueSource::resolve(self.form, self.name, self.value, self.on_change)
    }
}

/// Areas recorded by the last render, used for hit-testing and placement
#[derive(Debug, Default, Clone, Copy)]
struct Geometry {
    viewport: Rect,
    input: Rect,
    trigger: Rect,
    dropdown: Option<Rect>,
    /// Option rows inside the dropdown border
    rows: Option<Rect>,
}

/// A select input with an optional filtering text field
///
/// The committed value is owned by whichever store the props resolve to;
/// the component itself holds the transient interaction state, the
/// internal value for the unbound case, and the geometry of its last
/// render.
///
/// Rendering draws the bordered input into the given area and, while open,
/// the option list directly below or above it (whichever side has room).
/// Render the combobox after any sibling widgets it may overlap.
#[derive(Debug)]
pub struct Combobox {
    state: InteractionState,
    internal_value: String,
    /// Selection and label the display text was last derived from
    synced: Option<(String, String)>,
    field: SearchField,
    config: ComboboxConfig,
    geometry: Geometry,
    scroll_offset: usize,
    scroll_requested: bool,
    blur_deadline: Option<Instant>,
}

impl Default for Combobox {
    fn default() -> Self {
        Self::new()
    }
}

impl Combobox {
    pub fn new() -> Self {
        Self::with_config(ComboboxConfig::default())
    }

    pub fn with_config(config: ComboboxConfig) -> Self {
        Self {
            state: InteractionState::default(),
            internal_value: String::new(),
            synced: None,
            field: SearchField::new(),
            config,
            geometry: Geometry::default(),
            scroll_offset: 0,
            scroll_requested: false,
            blur_deadline: None,
        }
    }

    /// Initial selection for a combobox that owns its value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.internal_value = value.into();
        self
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.state.highlighted
    }

    pub fn display_text(&self) -> &str {
        &self.state.display_text
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn position(&self) -> DropdownPosition {
        self.state.position
    }

    /// Selection held by the widget when no other owner is bound
    pub fn internal_value(&self) -> &str {
        &self.internal_value
    }

    /// First visible row of the dropdown
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whether a blur is waiting out its debounce
    pub fn is_blur_pending(&self) -> bool {
        self.blur_deadline.is_some()
    }

    /// Dropdown area from the last layout, if open
    pub fn dropdown_area(&self) -> Option<Rect> {
        self.geometry.dropdown
    }

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    fn filtered<'o, A>(&self, props: &ComboboxProps<'o, A>) -> Vec<&'o SelectOption> {
        filter_options(props.options, &self.state.search_text, props.typeahead)
    }

    /// Refresh the display text after the selection or its label changed outside
    fn sync_display(&mut self, options: &[SelectOption], selection: &str) {
        if self.state.is_open {
            return;
        }
        let label = label_for(options, selection).unwrap_or_default();
        if let Some((value, synced_label)) = &self.synced {
            if value == selection && synced_label == label {
                return;
            }
        }
        self.state.display_text = label.to_string();
        self.field.move_to_end(&self.state.display_text);
        self.synced = Some((selection.to_string(), label.to_string()));
    }

    fn open<A>(&mut self, props: &ComboboxProps<'_, A>, highlight_first: bool) {
        let len = self.filtered(props).len();
        let estimate = estimate_dropdown_height(len, &self.config.metrics);
        let position = choose_position(self.geometry.input, self.geometry.viewport.height, estimate);

        self.state.open(position, highlight_first, len);
        self.scroll_offset = 0;
        self.scroll_requested = self.state.highlighted.is_some();
        self.layout_dropdown(len);
        debug!(position = position.as_str(), options = len, "combobox open");
    }

    fn commit<A>(&mut self, option: &SelectOption, source: &ValueSource<'_, A>) -> Option<A> {
        let action = source.write(&mut self.internal_value, &option.value);
        debug!(value = %option.value, owner = source.kind(), "combobox commit");
        self.synced = Some((option.value.clone(), option.label.clone()));
        self.close(option.label.clone());
        action
    }

    fn cancel(&mut self, options: &[SelectOption], selection: &str, cause: &'static str) {
        debug!(cause, "combobox cancel");
        let label = label_for(options, selection).unwrap_or_default().to_string();
        self.synced = Some((selection.to_string(), label.clone()));
        self.close(label);
    }

    fn close(&mut self, display_text: String) {
        self.state.close(display_text);
        self.field.move_to_end(&self.state.display_text);
        self.blur_deadline = None;
        self.scroll_offset = 0;
        self.scroll_requested = false;
        self.geometry.dropdown = None;
        self.geometry.rows = None;
    }

    fn layout_dropdown(&mut self, len: usize) {
        let height = estimate_dropdown_height(len, &self.config.metrics);
        let area = dropdown_area(
            self.geometry.input,
            self.geometry.viewport,
            self.state.position,
            height,
        );
        if area.is_empty() {
            self.geometry.dropdown = None;
            self.geometry.rows = None;
        } else {
            self.geometry.dropdown = Some(area);
            self.geometry.rows = Some(Block::default().borders(Borders::ALL).inner(area));
        }
    }

    fn visible_rows(&self) -> usize {
        self.geometry.rows.map_or(0, |rows| rows.height as usize)
    }

    fn dropdown_contains(&self, column: u16, row: u16) -> bool {
        self.geometry
            .dropdown
            .is_some_and(|area| rect_contains(area, column, row))
    }

    /// Filtered-list index of the option row at a cell
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let rows = self.geometry.rows?;
        rect_contains(rows, column, row).then(|| self.scroll_offset + (row - rows.y) as usize)
    }

    /// Scroll the minimum amount to bring `index` into view
    fn ensure_visible(&mut self, index: usize, visible: usize) {
        if visible == 0 {
            return;
        }

        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + visible {
            self.scroll_offset = index + 1 - visible;
        }
    }

    fn handle_blur(&mut self, target: Option<(u16, u16)>, options: &[SelectOption], selection: &str) {
        if !self.state.is_open {
            self.blur_deadline = None;
            return;
        }

        match target {
            Some((column, row)) if self.dropdown_contains(column, row) => {
                trace!(column, row, "blur into dropdown ignored");
            }
            Some(_) => self.cancel(options, selection, "blur"),
            None => {
                self.blur_deadline = Some(Instant::now() + self.config.blur_debounce());
                debug!(
                    debounce_ms = self.config.blur_debounce_ms,
                    "combobox blur deferred"
                );
            }
        }
    }

    fn expire_blur(&mut self, options: &[SelectOption], selection: &str) {
        let Some(deadline) = self.blur_deadline else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }

        self.blur_deadline = None;
        debug!("combobox blur debounce expired");
        if self.state.is_open {
            self.cancel(options, selection, "blur");
        }
    }

    fn handle_key<A>(
        &mut self,
        key: &KeyEvent,
        props: &ComboboxProps<'_, A>,
        source: &ValueSource<'_, A>,
        selection: &str,
    ) -> Option<A> {
        let context = if self.state.is_open {
            ComboboxContext::Open
        } else {
            ComboboxContext::Closed
        };

        match command_for(&self.config.keys, *key, context) {
            Some(Command::Open) => {
                self.blur_deadline = None;
                self.open(props, true);
                None
            }
            Some(Command::Next) => {
                self.state.highlight_next(self.filtered(props).len());
                self.scroll_requested = true;
                trace!(highlighted = ?self.state.highlighted, "highlight next");
                None
            }
            Some(Command::Prev) => {
                self.state.highlight_prev(self.filtered(props).len());
                self.scroll_requested = true;
                trace!(highlighted = ?self.state.highlighted, "highlight prev");
                None
            }
            Some(Command::Commit) => self.commit_highlighted(props, source),
            Some(Command::Cancel) => {
                self.cancel(props.options, selection, "escape");
                None
            }
            None if props.typeahead => {
                self.edit(key, props);
                None
            }
            None => None,
        }
    }

    fn commit_highlighted<A>(
        &mut self,
        props: &ComboboxProps<'_, A>,
        source: &ValueSource<'_, A>,
    ) -> Option<A> {
        let filtered = self.filtered(props);
        let option = self.state.highlighted.and_then(|i| filtered.get(i).copied())?;
        if option.disabled {
            trace!(value = %option.value, "disabled option not committed");
            return None;
        }
        self.commit(option, source)
    }

    fn edit<A>(&mut self, key: &KeyEvent, props: &ComboboxProps<'_, A>) {
        let Edit::Changed(text) = self.field.apply(key, &self.state.display_text) else {
            return;
        };

        self.state.set_search(text);
        if !self.state.is_open {
            self.blur_deadline = None;
            self.open(props, false);
        }

        let filtered = self.filtered(props);
        self.state.highlighted = if self.state.search_text.is_empty() {
            None
        } else {
            first_enabled(&filtered)
        };
        self.state.keyboard_navigation = self.state.highlighted.is_some();
        self.scroll_offset = 0;
        self.scroll_requested = true;
        self.layout_dropdown(filtered.len());
        trace!(search = %self.state.search_text, matches = filtered.len(), "combobox search");
    }

    fn handle_mouse<A>(
        &mut self,
        mouse: &MouseEvent,
        props: &ComboboxProps<'_, A>,
        source: &ValueSource<'_, A>,
        selection: &str,
    ) -> Option<A> {
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.state.is_open => {
                if let Some(index) = self.row_at(column, row) {
                    let filtered = self.filtered(props);
                    return match filtered.get(index) {
                        Some(option) if !option.disabled => self.commit(option, source),
                        _ => None,
                    };
                }
                if self.dropdown_contains(column, row) {
                    return None;
                }
                if rect_contains(self.geometry.trigger, column, row) {
                    self.cancel(props.options, selection, "trigger");
                    return props.on_blur_request.map(|f| f());
                }
                if !rect_contains(self.geometry.input, column, row) {
                    self.cancel(props.options, selection, "outside click");
                }
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if rect_contains(self.geometry.input, column, row) {
                    self.blur_deadline = None;
                    self.open(props, false);
                }
                None
            }
            MouseEventKind::Moved if self.state.is_open => {
                let index = self.row_at(column, row)?;
                let is_current = self.state.highlighted == Some(index)
                    && !self.state.keyboard_navigation;
                if index < self.filtered(props).len() && !is_current {
                    self.state.hover(index);
                    trace!(highlighted = index, "highlight hover");
                }
                None
            }
            _ => None,
        }
    }

    fn scroll_by<A>(&mut self, column: u16, row: u16, delta: isize, props: &ComboboxProps<'_, A>) {
        if !self.state.is_open || !self.dropdown_contains(column, row) {
            return;
        }
        let max = self.filtered(props).len().saturating_sub(self.visible_rows());
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
        self.scroll_requested = false;
    }

    fn row_style(&self, index: usize, option: &SelectOption) -> Style {
        let base = if option.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        if self.state.highlighted != Some(index) {
            base
        } else if self.state.keyboard_navigation {
            base.bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            base.add_modifier(Modifier::REVERSED)
        }
    }

    fn render_dropdown<A>(&mut self, frame: &mut Frame, props: &ComboboxProps<'_, A>) {
        let filtered = self.filtered(props);
        self.state.revalidate(filtered.len());
        self.layout_dropdown(filtered.len());

        let (Some(area), Some(rows)) = (self.geometry.dropdown, self.geometry.rows) else {
            return;
        };

        let visible = rows.height as usize;
        if self.scroll_requested {
            if let Some(index) = self.state.highlighted {
                self.ensure_visible(index, visible);
            }
            self.scroll_requested = false;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(filtered.len().saturating_sub(visible));

        let items: Vec<ListItem> = if filtered.is_empty() {
            vec![ListItem::new(Line::raw(NO_RESULTS)).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )]
        } else {
            filtered
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    ListItem::new(Line::raw(option.label.as_str())).style(self.row_style(i, option))
                })
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        let mut list_state = ListState::default();
        *list_state.offset_mut() = self.scroll_offset;

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

impl<A> Component<A> for Combobox {
    type Props<'a> = ComboboxProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if props.disabled {
            return None;
        }

        let source = props.value_source();
        let selection = source.read(&self.internal_value).to_string();
        self.sync_display(props.options, &selection);

        match event {
            EventKind::Focus => {
                self.blur_deadline = None;
                if !self.state.is_open {
                    self.open(&props, false);
                }
                None
            }
            EventKind::Blur { target } => {
                self.handle_blur(*target, props.options, &selection);
                None
            }
            EventKind::Tick => {
                self.expire_blur(props.options, &selection);
                None
            }
            EventKind::Resize(width, height) => {
                self.geometry.viewport = Rect::new(0, 0, *width, *height);
                None
            }
            EventKind::Key(key) if props.is_focused => {
                self.handle_key(key, &props, &source, &selection)
            }
            EventKind::Mouse(mouse) => self.handle_mouse(mouse, &props, &source, &selection),
            EventKind::Scroll { column, row, delta } => {
                self.scroll_by(*column, *row, *delta, &props);
                None
            }
            EventKind::Key(_) => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let source = props.value_source();
        let selection = source.read(&self.internal_value).to_string();
        self.sync_display(props.options, &selection);

        self.geometry.viewport = frame.area();
        self.geometry.input = area;

        let focused = props.is_focused && !props.disabled;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(label) = props.label {
            let mut title = vec![Span::raw(label)];
            if props.required {
                title.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            block = block.title(Line::from(title));
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Trigger takes the last column, separated from the text by a space
        self.geometry.trigger = Rect::new(
            inner.right().saturating_sub(1),
            inner.y,
            inner.width.min(1),
            inner.height.min(1),
        );
        let text_area = Rect {
            width: inner.width.saturating_sub(2),
            height: inner.height.min(1),
            ..inner
        };

        let (text, style) = if self.state.display_text.is_empty() {
            (
                props.placeholder.unwrap_or(DEFAULT_PLACEHOLDER),
                Style::default().fg(Color::DarkGray),
            )
        } else if props.disabled {
            (
                self.state.display_text.as_str(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (self.state.display_text.as_str(), Style::default())
        };
        frame.render_widget(Paragraph::new(text).style(style), text_area);

        let trigger_style = if props.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(trigger_glyph(self.state.is_open)).style(trigger_style),
            self.geometry.trigger,
        );

        if focused && props.typeahead {
            let column = self.field.cursor_column(&self.state.display_text);
            if let Ok(column) = u16::try_from(column) {
                if column < text_area.width {
                    frame.set_cursor_position((text_area.x + column, text_area.y));
                }
            }
        }

        if self.state.is_open && !props.disabled {
            self.render_dropdown(frame, &props);
        } else {
            self.geometry.dropdown = None;
            self.geometry.rows = None;
        }
    }
}
