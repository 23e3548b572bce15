//! Deferred blur handling under a paused tokio clock

use std::time::Duration;

use tui_combobox::prelude::*;
use tui_combobox::testing::{advance_time, mouse_down, RenderHarness};

#[derive(Action, Clone, Debug, PartialEq)]
enum PriorityAction {
    Select(String),
}

fn priorities() -> Vec<SelectOption> {
    vec![
        SelectOption::new("low", "Low"),
        SelectOption::new("medium", "Medium"),
        SelectOption::new("high", "High"),
        SelectOption::new("urgent", "Urgent").disabled(),
    ]
}

fn props(options: &[SelectOption]) -> ComboboxProps<'_, PriorityAction> {
    ComboboxProps::new(options)
        .on_change(PriorityAction::Select)
        .focused(true)
}

fn send(
    combobox: &mut Combobox,
    event: EventKind,
    props: ComboboxProps<'_, PriorityAction>,
) -> Vec<PriorityAction> {
    combobox.handle_event(&event, props).into_iter().collect()
}

/// Open the dropdown below an input at the top of a 40x12 terminal
fn open(combobox: &mut Combobox, options: &[SelectOption]) {
    let mut render = RenderHarness::new(40, 12);
    render.render(|frame| combobox.render(frame, Rect::new(0, 0, 30, 3), props(options)));
    send(combobox, EventKind::Focus, props(options));
    render.render(|frame| combobox.render(frame, Rect::new(0, 0, 30, 3), props(options)));
    assert!(combobox.is_open());
}

#[tokio::test(start_paused = true)]
async fn unknown_blur_target_cancels_after_debounce() {
    let options = priorities();
    let mut combobox = Combobox::new();
    open(&mut combobox, &options);

    send(&mut combobox, EventKind::Blur { target: None }, props(&options));
    assert!(combobox.is_blur_pending());

    send(&mut combobox, EventKind::Tick, props(&options));
    assert!(combobox.is_open());

    advance_time(Duration::from_millis(99)).await;
    send(&mut combobox, EventKind::Tick, props(&options));
    assert!(combobox.is_open());

    advance_time(Duration::from_millis(1)).await;
    let actions = send(&mut combobox, EventKind::Tick, props(&options));

    assert!(actions.is_empty());
    assert!(!combobox.is_open());
    assert!(!combobox.is_blur_pending());
}

#[tokio::test(start_paused = true)]
async fn option_click_during_debounce_commits() {
    let options = priorities();
    let mut combobox = Combobox::new();
    open(&mut combobox, &options);

    send(&mut combobox, EventKind::Blur { target: None }, props(&options));
    advance_time(Duration::from_millis(40)).await;

    // third row of the dropdown
    let actions = send(&mut combobox, mouse_down(5, 6), props(&options));
    assert_eq!(actions, vec![PriorityAction::Select("high".into())]);
    assert_eq!(combobox.display_text(), "High");
    assert!(!combobox.is_blur_pending());

    advance_time(Duration::from_millis(200)).await;
    let actions = send(&mut combobox, EventKind::Tick, props(&options));
    assert!(actions.is_empty());
    assert_eq!(combobox.display_text(), "High");
}

#[tokio::test(start_paused = true)]
async fn refocus_clears_pending_blur() {
    let options = priorities();
    let mut combobox = Combobox::new();
    open(&mut combobox, &options);

    send(&mut combobox, EventKind::Blur { target: None }, props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));
    assert!(!combobox.is_blur_pending());

    advance_time(Duration::from_millis(500)).await;
    send(&mut combobox, EventKind::Tick, props(&options));
    assert!(combobox.is_open());
}

#[tokio::test(start_paused = true)]
async fn configured_debounce_is_used() {
    let options = priorities();
    let config = ComboboxConfig::from_json(r#"{"blur_debounce_ms": 300}"#).unwrap();
    let mut combobox = Combobox::with_config(config);
    open(&mut combobox, &options);

    send(&mut combobox, EventKind::Blur { target: None }, props(&options));

    advance_time(Duration::from_millis(250)).await;
    send(&mut combobox, EventKind::Tick, props(&options));
    assert!(combobox.is_open());

    advance_time(Duration::from_millis(50)).await;
    send(&mut combobox, EventKind::Tick, props(&options));
    assert!(!combobox.is_open());
}

#[test]
fn known_outside_target_cancels_immediately() {
    let options = priorities();
    let mut combobox = Combobox::new();
    open(&mut combobox, &options);

    send(
        &mut combobox,
        EventKind::Blur {
            target: Some((35, 1)),
        },
        props(&options),
    );

    assert!(!combobox.is_open());
    assert!(!combobox.is_blur_pending());
}

#[test]
fn blur_while_closed_is_ignored() {
    let options = priorities();
    let mut combobox = Combobox::new();

    send(&mut combobox, EventKind::Blur { target: None }, props(&options));

    assert!(!combobox.is_blur_pending());
    assert!(!combobox.is_open());
}
