//! End-to-end interaction scenarios driven through `handle_event` and `render`

use tui_combobox::prelude::*;
use tui_combobox::testing::{ctrl_key, key, mouse_down, typed, RenderHarness};

#[derive(Action, Clone, Debug, PartialEq)]
enum CountryAction {
    Select(String),
}

fn countries() -> Vec<SelectOption> {
    vec![
        SelectOption::new("us", "United States"),
        SelectOption::new("ca", "Canada"),
    ]
}

fn props(options: &[SelectOption]) -> ComboboxProps<'_, CountryAction> {
    ComboboxProps::new(options)
        .on_change(CountryAction::Select)
        .typeahead(true)
        .focused(true)
}

fn send(
    combobox: &mut Combobox,
    event: EventKind,
    props: ComboboxProps<'_, CountryAction>,
) -> Vec<CountryAction> {
    combobox.handle_event(&event, props).into_iter().collect()
}

fn render_at(
    combobox: &mut Combobox,
    height: u16,
    area: Rect,
    props: ComboboxProps<'_, CountryAction>,
) -> String {
    let mut render = RenderHarness::new(40, height);
    render.render_to_string_plain(|frame| combobox.render(frame, area, props))
}

#[test]
fn typing_can_then_enter_selects_canada() {
    let options = countries();
    let mut combobox = Combobox::new();

    for event in typed("can") {
        send(&mut combobox, event, props(&options));
    }

    assert!(combobox.is_open());
    assert_eq!(combobox.search_text(), "can");
    let filtered = tui_combobox::filter_options(&options, combobox.search_text(), true);
    assert_eq!(filtered, vec![&options[1]]);
    assert_eq!(combobox.highlighted(), Some(0));

    let actions = send(&mut combobox, EventKind::Key(key("enter")), props(&options));

    assert_eq!(actions, vec![CountryAction::Select("ca".into())]);
    assert_eq!(combobox.display_text(), "Canada");
    assert_eq!(combobox.search_text(), "");
    assert!(!combobox.is_open());
}

#[test]
fn arrow_down_opens_with_first_option_highlighted() {
    let options = countries();
    let mut combobox = Combobox::new();

    send(&mut combobox, EventKind::Key(key("down")), props(&options));

    assert!(combobox.is_open());
    assert_eq!(combobox.highlighted(), Some(0));

    let actions = send(&mut combobox, EventKind::Key(key("enter")), props(&options));
    assert_eq!(actions, vec![CountryAction::Select("us".into())]);
    assert_eq!(combobox.display_text(), "United States");
}

#[test]
fn keyboard_navigation_wraps_both_ways() {
    let options = vec![
        SelectOption::new("low", "Low"),
        SelectOption::new("medium", "Medium"),
        SelectOption::new("high", "High"),
    ];
    let mut combobox = Combobox::new();
    send(&mut combobox, EventKind::Key(key("down")), props(&options));
    send(&mut combobox, EventKind::Key(key("down")), props(&options));
    send(&mut combobox, EventKind::Key(key("down")), props(&options));
    assert_eq!(combobox.highlighted(), Some(2));

    send(&mut combobox, EventKind::Key(key("down")), props(&options));
    assert_eq!(combobox.highlighted(), Some(0));

    send(&mut combobox, EventKind::Key(key("up")), props(&options));
    assert_eq!(combobox.highlighted(), Some(2));
}

#[test]
fn up_from_no_highlight_goes_to_last() {
    let options = countries();
    let mut combobox = Combobox::new();
    send(&mut combobox, EventKind::Focus, props(&options));
    assert_eq!(combobox.highlighted(), None);

    send(&mut combobox, EventKind::Key(key("up")), props(&options));
    assert_eq!(combobox.highlighted(), Some(1));
    assert!(combobox.state().keyboard_navigation);
}

#[test]
fn outside_click_reverts_unsaved_text_to_empty() {
    let options = countries();
    let mut combobox = Combobox::new();
    let input = Rect::new(0, 0, 30, 3);
    render_at(&mut combobox, 12, input, props(&options));

    for event in typed("xyz") {
        send(&mut combobox, event, props(&options));
    }
    assert_eq!(combobox.display_text(), "xyz");
    render_at(&mut combobox, 12, input, props(&options));

    let actions = send(&mut combobox, mouse_down(35, 10), props(&options));

    assert!(actions.is_empty());
    assert!(!combobox.is_open());
    assert_eq!(combobox.search_text(), "");
    assert_eq!(combobox.display_text(), "");
}

#[test]
fn outside_click_reverts_unsaved_text_to_committed_label() {
    let options = countries();
    let mut combobox = Combobox::new();
    let input = Rect::new(0, 0, 30, 3);
    render_at(&mut combobox, 12, input, props(&options));

    for event in typed("can") {
        send(&mut combobox, event, props(&options));
    }
    send(&mut combobox, EventKind::Key(key("enter")), props(&options));

    send(&mut combobox, EventKind::Key(ctrl_key('u')), props(&options));
    for event in typed("xyz") {
        send(&mut combobox, event, props(&options));
    }
    render_at(&mut combobox, 12, input, props(&options));

    send(&mut combobox, mouse_down(35, 10), props(&options));

    assert!(!combobox.is_open());
    assert_eq!(combobox.display_text(), "Canada");
    assert_eq!(combobox.internal_value(), "ca");
}

#[test]
fn enter_on_disabled_option_is_a_no_op() {
    let options = vec![
        SelectOption::new("high", "High"),
        SelectOption::new("urgent", "Urgent").disabled(),
    ];
    let mut combobox = Combobox::new();
    let props = props(&options).value("high");

    send(&mut combobox, EventKind::Key(key("down")), props);
    send(&mut combobox, EventKind::Key(key("down")), props);
    assert_eq!(combobox.highlighted(), Some(1));

    let actions = send(&mut combobox, EventKind::Key(key("enter")), props);

    assert!(actions.is_empty());
    assert!(combobox.is_open());
    assert_eq!(combobox.highlighted(), Some(1));
}

#[test]
fn clicking_disabled_option_is_a_no_op() {
    let options = vec![
        SelectOption::new("high", "High"),
        SelectOption::new("urgent", "Urgent").disabled(),
    ];
    let mut combobox = Combobox::new();
    let input = Rect::new(0, 0, 30, 3);
    render_at(&mut combobox, 12, input, props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));
    render_at(&mut combobox, 12, input, props(&options));

    // second row inside the dropdown border
    let actions = send(&mut combobox, mouse_down(4, 5), props(&options));

    assert!(actions.is_empty());
    assert!(combobox.is_open());
}

#[test]
fn committing_the_selected_value_again_is_idempotent() {
    let options = countries();
    let mut combobox = Combobox::new();
    let props = props(&options).value("ca");

    let mut changes = Vec::new();
    for _ in 0..2 {
        // clear the shown label, then search again
        send(&mut combobox, EventKind::Key(ctrl_key('u')), props);
        for event in typed("can") {
            changes.extend(send(&mut combobox, event, props));
        }
        changes.extend(send(&mut combobox, EventKind::Key(key("enter")), props));

        assert!(!combobox.is_open());
        assert_eq!(combobox.display_text(), "Canada");
    }

    assert_eq!(
        changes,
        vec![
            CountryAction::Select("ca".into()),
            CountryAction::Select("ca".into())
        ]
    );
}

#[test]
fn opens_above_when_the_input_sits_at_the_bottom() {
    let options = countries();
    let mut combobox = Combobox::new();
    let input = Rect::new(0, 20, 30, 3);

    render_at(&mut combobox, 24, input, props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));
    let output = render_at(&mut combobox, 24, input, props(&options));

    assert_eq!(combobox.position(), DropdownPosition::Above);
    assert_eq!(combobox.dropdown_area(), Some(Rect::new(0, 16, 30, 4)));
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[17].contains("United States"));
    assert!(lines[18].contains("Canada"));
}

#[test]
fn opens_below_when_there_is_room() {
    let options = countries();
    let mut combobox = Combobox::new();
    let input = Rect::new(0, 5, 30, 3);

    render_at(&mut combobox, 24, input, props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));

    assert_eq!(combobox.position(), DropdownPosition::Below);
    assert_eq!(combobox.dropdown_area(), Some(Rect::new(0, 8, 30, 4)));
}

#[test]
fn placement_is_kept_while_open() {
    let options = countries();
    let mut combobox = Combobox::new();

    render_at(&mut combobox, 24, Rect::new(0, 20, 30, 3), props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));
    assert_eq!(combobox.position(), DropdownPosition::Above);

    // moving the input does not re-run placement until the next open
    render_at(&mut combobox, 24, Rect::new(0, 0, 30, 3), props(&options));
    assert_eq!(combobox.position(), DropdownPosition::Above);

    send(&mut combobox, EventKind::Key(key("esc")), props(&options));
    send(&mut combobox, EventKind::Focus, props(&options));
    assert_eq!(combobox.position(), DropdownPosition::Below);
}
