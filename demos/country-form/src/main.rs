//! Country form - tui-combobox demo
//!
//! Shows the three ways a combobox can own its value:
//! - a standalone select whose value lives in app state (controlled)
//! - a form whose fields share one record in the store (form context)
//! - a disabled select that keeps its own value (internal)
//!
//! Keys: Tab/Shift+Tab move focus, Down/Enter/Space open, type to filter,
//! Esc closes, Ctrl+S submits, Ctrl+C quits. Mouse clicks and the scroll
//! wheel work on the inputs and the dropdown.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p country-form
//! cargo run -p country-form -- --no-typeahead
//! RUST_LOG=tui_combobox=trace cargo run -p country-form -- --log /tmp/combobox.log
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tui_combobox::prelude::*;
use tui_combobox::rect_contains;

/// How often pending blurs are checked
const TICK_MS: u64 = 25;

/// Form of filterable selects - tui-combobox demo
#[derive(Parser, Debug)]
#[command(name = "country-form")]
#[command(about = "A terminal form built from tui-combobox selects")]
struct Args {
    /// JSON file with combobox settings (metrics, blur debounce, keys)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Disable typing to filter the options
    #[arg(long)]
    no_typeahead: bool,

    /// Write logs to this file, filtered by RUST_LOG (default: debug)
    #[arg(long)]
    log: Option<PathBuf>,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug)]
struct AppState {
    /// Record shared by the form's fields
    form: FormData,
    /// Value of the standalone select
    favorite_size: String,
    /// Last submitted record, as JSON
    submitted: Option<String>,
}

impl AppState {
    fn new() -> Self {
        Self {
            form: form_data([("country", ""), ("size", ""), ("priority", "")]),
            favorite_size: String::new(),
            submitted: None,
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Action, Clone, Debug)]
enum AppAction {
    FormReplace(FormData),
    FormSubmit,
    FavoriteSizeSelect(String),
    FocusNext,
    FocusPrev,
    Quit,
}

fn reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::FormReplace(next) => apply_form_change(&mut state.form, next),
        AppAction::FormSubmit => {
            state.submitted = Some(serde_json::to_string(&state.form).unwrap_or_default());
            true
        }
        AppAction::FavoriteSizeSelect(value) => {
            if state.favorite_size == value {
                return false;
            }
            state.favorite_size = value;
            true
        }
        // handled by the main loop
        AppAction::FocusNext | AppAction::FocusPrev | AppAction::Quit => false,
    }
}

// ============================================================================
// Fields
// ============================================================================

fn countries() -> Vec<SelectOption> {
    [
        ("us", "United States"),
        ("ca", "Canada"),
        ("uk", "United Kingdom"),
        ("de", "Germany"),
        ("fr", "France"),
        ("es", "Spain"),
        ("it", "Italy"),
        ("jp", "Japan"),
        ("au", "Australia"),
        ("br", "Brazil"),
        ("mx", "Mexico"),
        ("in", "India"),
    ]
    .into_iter()
    .map(|(value, label)| SelectOption::new(value, label))
    .collect()
}

fn sizes() -> Vec<SelectOption> {
    vec![
        SelectOption::new("xs", "Extra Small"),
        SelectOption::new("s", "Small"),
        SelectOption::new("m", "Medium"),
        SelectOption::new("l", "Large"),
        SelectOption::new("xl", "Extra Large"),
    ]
}

fn priorities() -> Vec<SelectOption> {
    vec![
        SelectOption::new("low", "Low"),
        SelectOption::new("medium", "Medium"),
        SelectOption::new("high", "High"),
        SelectOption::new("urgent", "Urgent").disabled(),
    ]
}

enum Binding {
    /// A named field of the form record
    Form(&'static str),
    /// `AppState::favorite_size`
    Controlled,
    /// The combobox's own value
    Internal,
}

struct FieldSpec {
    label: &'static str,
    binding: Binding,
    options: Vec<SelectOption>,
    required: bool,
    disabled: bool,
}

impl FieldSpec {
    fn props<'a>(
        &'a self,
        state: &'a AppState,
        typeahead: bool,
        is_focused: bool,
    ) -> ComboboxProps<'a, AppAction> {
        let props = ComboboxProps::new(&self.options)
            .label(self.label)
            .required(self.required)
            .disabled(self.disabled)
            .typeahead(typeahead)
            .focused(is_focused)
            .on_blur_request(|| AppAction::FocusNext);

        match self.binding {
            Binding::Form(name) => {
                props.form(FormContext::new(&state.form, AppAction::FormReplace), name)
            }
            Binding::Controlled => props
                .value(&state.favorite_size)
                .on_change(AppAction::FavoriteSizeSelect),
            Binding::Internal => props,
        }
    }
}

struct Field {
    spec: FieldSpec,
    combobox: Combobox,
    area: Rect,
}

// ============================================================================
// UI - focus management and routing events to the comboboxes
// ============================================================================

struct Ui {
    fields: Vec<Field>,
    focus: usize,
    typeahead: bool,
}

impl Ui {
    fn new(config: &ComboboxConfig, typeahead: bool) -> Self {
        let specs = vec![
            FieldSpec {
                label: "Favorite size",
                binding: Binding::Controlled,
                options: sizes(),
                required: false,
                disabled: false,
            },
            FieldSpec {
                label: "Country",
                binding: Binding::Form("country"),
                options: countries(),
                required: true,
                disabled: false,
            },
            FieldSpec {
                label: "Size",
                binding: Binding::Form("size"),
                options: sizes(),
                required: false,
                disabled: false,
            },
            FieldSpec {
                label: "Priority",
                binding: Binding::Form("priority"),
                options: priorities(),
                required: false,
                disabled: false,
            },
            FieldSpec {
                label: "Region (locked)",
                binding: Binding::Internal,
                options: vec![
                    SelectOption::new("eu", "Europe"),
                    SelectOption::new("na", "North America"),
                ],
                required: false,
                disabled: true,
            },
        ];

        let fields = specs
            .into_iter()
            .map(|spec| {
                let combobox = match spec.binding {
                    Binding::Internal => Combobox::with_config(config.clone()).with_value("eu"),
                    _ => Combobox::with_config(config.clone()),
                };
                Field {
                    spec,
                    combobox,
                    area: Rect::default(),
                }
            })
            .collect();

        Self {
            fields,
            focus: 0,
            typeahead,
        }
    }

    fn is_blur_pending(&self) -> bool {
        self.fields.iter().any(|f| f.combobox.is_blur_pending())
    }

    fn send(&mut self, index: usize, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let typeahead = self.typeahead;
        let is_focused = index == self.focus;
        let field = &mut self.fields[index];
        let props = field.spec.props(state, typeahead, is_focused);
        field.combobox.handle_event(event, props).into_iter().collect()
    }

    fn broadcast(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let mut actions = Vec::new();
        for index in 0..self.fields.len() {
            actions.extend(self.send(index, event, state));
        }
        actions
    }

    /// Move focus, telling the old field where focus went when known
    fn focus_on(
        &mut self,
        index: usize,
        target: Option<(u16, u16)>,
        state: &AppState,
    ) -> Vec<AppAction> {
        let mut actions = self.send(self.focus, &EventKind::Blur { target }, state);
        self.focus = index;
        actions.extend(self.send(index, &EventKind::Focus, state));
        actions
    }

    fn focus_step(&mut self, forward: bool, state: &AppState) -> Vec<AppAction> {
        let len = self.fields.len();
        let mut next = self.focus;
        for _ in 0..len {
            next = if forward {
                (next + 1) % len
            } else {
                (next + len - 1) % len
            };
            if !self.fields[next].spec.disabled {
                break;
            }
        }
        if next == self.focus {
            return Vec::new();
        }
        self.focus_on(next, None, state)
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        match event {
            EventKind::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('c') | KeyCode::Char('q') => return vec![AppAction::Quit],
                        KeyCode::Char('s') => return vec![AppAction::FormSubmit],
                        _ => {}
                    }
                }
                match key.code {
                    KeyCode::Tab => vec![AppAction::FocusNext],
                    KeyCode::BackTab => vec![AppAction::FocusPrev],
                    _ => self.send(self.focus, event, state),
                }
            }
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (column, row) = (mouse.column, mouse.row);
                // the open dropdown may cover other fields
                let in_dropdown = self.fields[self.focus]
                    .combobox
                    .dropdown_area()
                    .is_some_and(|area| rect_contains(area, column, row));
                let clicked = self
                    .fields
                    .iter()
                    .position(|f| rect_contains(f.area, column, row));

                match clicked {
                    Some(index)
                        if !in_dropdown
                            && index != self.focus
                            && !self.fields[index].spec.disabled =>
                    {
                        self.focus_on(index, Some((column, row)), state)
                    }
                    _ => self.send(self.focus, event, state),
                }
            }
            EventKind::Mouse(_) | EventKind::Scroll { .. } => self.send(self.focus, event, state),
            EventKind::Tick | EventKind::Resize(..) => self.broadcast(event, state),
            EventKind::Focus | EventKind::Blur { .. } => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let [column] = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [title, standalone, form_title, country, size, priority, region, _, status, help] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(column);

        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new("Standalone select").style(heading), title);
        frame.render_widget(Paragraph::new("Form").style(heading), form_title);

        for (field, area) in self
            .fields
            .iter_mut()
            .zip([standalone, country, size, priority, region])
        {
            field.area = area;
        }

        let status_line = match &state.submitted {
            Some(json) => Paragraph::new(format!("Submitted: {json}")),
            None => Paragraph::new("Ctrl+S submits the form").style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status_line, status);
        frame.render_widget(
            Paragraph::new("Tab: focus  Down: open  Esc: close  Ctrl+C: quit")
                .style(Style::default().fg(Color::DarkGray)),
            help,
        );

        // The focused field renders last so its dropdown stays on top
        let typeahead = self.typeahead;
        let focus = self.focus;
        let order = (0..self.fields.len())
            .filter(|&i| i != focus)
            .chain(std::iter::once(focus));
        for index in order {
            let field = &mut self.fields[index];
            let props = field.spec.props(state, typeahead, index == focus);
            field.combobox.render(frame, field.area, props);
        }
    }
}

// ============================================================================
// Main - setup terminal, run event loop, cleanup
// ============================================================================

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    // Load config before entering TUI mode
    let config = match &args.config {
        Some(path) => match ComboboxConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => ComboboxConfig::default(),
    };
    tracing::info!(typeahead = !args.no_typeahead, "starting country form");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config, !args.no_typeahead).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &ComboboxConfig,
    typeahead: bool,
) -> io::Result<()> {
    // Action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();

    // Store = state + reducer, with dispatched actions logged
    let mut store = StoreWithMiddleware::new(AppState::new(), reducer, LoggingMiddleware::new());
    let mut ui = Ui::new(config, typeahead);

    // Event poller
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut tick = tokio::time::interval(Duration::from_millis(TICK_MS));
    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                for action in ui.handle_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
                // the comboboxes keep their own interaction state
                should_render = true;
            }

            _ = tick.tick(), if ui.is_blur_pending() => {
                for action in ui.handle_event(&EventKind::Tick, store.state()) {
                    let _ = action_tx.send(action);
                }
                should_render = true;
            }

            Some(action) = action_rx.recv() => {
                let follow_up = match action {
                    AppAction::Quit => break,
                    AppAction::FocusNext => ui.focus_step(true, store.state()),
                    AppAction::FocusPrev => ui.focus_step(false, store.state()),
                    action => {
                        should_render |= store.dispatch(action);
                        Vec::new()
                    }
                };
                if !follow_up.is_empty() || ui.is_blur_pending() {
                    should_render = true;
                }
                for action in follow_up {
                    let _ = action_tx.send(action);
                }
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
