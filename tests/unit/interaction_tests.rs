// Unit tests for pointer gestures on the timeline
// Parameterized snapping and gesture cases driven through the public engine API

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{NaiveDateTime, Timelike};
use egui::{pos2, vec2};
use test_case::test_case;

use fixtures::dates::{at, monday_midnight};
use fixtures::roster::slot;
use fixtures::screen::{row_y, settings, x_at, HEIGHT, WIDTH};
use shift_timeline::models::roster::Group;
use shift_timeline::services::roster::InMemoryRoster;
use shift_timeline::ui_egui::interaction::PointerState;
use shift_timeline::ui_egui::ShiftTimeline;
use shift_timeline::utils::date::round_to_granularity;

fn hm(time: NaiveDateTime) -> (u32, u32) {
    (time.hour(), time.minute())
}

fn empty_timeline(granularity: u32) -> ShiftTimeline<InMemoryRoster> {
    let group = Group::new("Kitchen").unwrap();
    let roster = InMemoryRoster::new(vec![group], Vec::new());
    let mut timeline = ShiftTimeline::new(roster, &settings(), monday_midnight());
    timeline.resize(WIDTH, HEIGHT);
    timeline.set_edit_granularity_minutes(granularity);
    timeline
}

#[test_case(9, 7, 30 => (9, 0) ; "rounds down below half")]
#[test_case(9, 52, 30 => (10, 0) ; "rounds up above half")]
#[test_case(9, 15, 30 => (9, 30) ; "ties round up")]
#[test_case(9, 7, 15 => (9, 0) ; "quarter hour down")]
#[test_case(9, 8, 15 => (9, 15) ; "quarter hour tie up")]
#[test_case(23, 45, 60 => (0, 0) ; "rolls over midnight")]
#[test_case(14, 33, 1 => (14, 33) ; "minute granularity is identity")]
fn test_round_to_granularity(h: u32, m: u32, granularity: u32) -> (u32, u32) {
    hm(round_to_granularity(at(h, m), granularity))
}

#[test_case(30, (9, 7), (9, 52) => Some(((9, 0), (10, 0))) ; "drag snaps to half hours")]
#[test_case(30, (9, 52), (9, 7) => Some(((9, 0), (10, 0))) ; "reverse drag is reordered")]
#[test_case(30, (9, 7), (9, 12) => None ; "short drag collapses to a click")]
#[test_case(15, (9, 7), (9, 12) => Some(((9, 0), (9, 15))) ; "finer granularity keeps short drag")]
#[test_case(60, (8, 29), (10, 31) => Some(((8, 0), (11, 0))) ; "hour granularity")]
fn test_drag_create(
    granularity: u32,
    from: (u32, u32),
    to: (u32, u32),
) -> Option<((u32, u32), (u32, u32))> {
    let mut timeline = empty_timeline(granularity);

    timeline.on_pointer_down(pos2(x_at(from.0, from.1), row_y(0)));
    timeline.on_pointer_move(pos2(x_at(to.0, to.1), row_y(0)));
    timeline.on_pointer_up(pos2(x_at(to.0, to.1), row_y(0)));

    assert_eq!(timeline.pointer_state(), PointerState::Idle);
    let slots = timeline.collaborator().slots();
    assert!(slots.len() <= 1);
    slots.first().map(|slot| (hm(slot.start), hm(slot.end)))
}

#[test]
fn test_preview_tracks_pointer() {
    let mut timeline = empty_timeline(30);

    timeline.on_pointer_down(pos2(x_at(12, 10), row_y(0)));
    timeline.on_pointer_move(pos2(x_at(10, 40), row_y(0)));

    let preview = timeline.preview().expect("preview while creating");
    assert_eq!(preview.label, "10:30-12:00");
    assert_eq!(preview.rect.min.x, x_at(10, 30));
    assert_eq!(preview.rect.max.x, x_at(12, 0));
    assert_eq!(preview.rect.min.y, 40.0);
}

#[test]
fn test_pointer_leave_cancels_drag_create() {
    let mut timeline = empty_timeline(30);

    timeline.on_pointer_down(pos2(x_at(9, 0), row_y(0)));
    timeline.on_pointer_leave();
    timeline.on_pointer_up(pos2(x_at(12, 0), row_y(0)));

    assert!(timeline.collaborator().slots().is_empty());
    assert!(timeline.preview().is_none());
}

#[test]
fn test_press_on_occupied_row_does_not_create() {
    let group = Group::new("Kitchen").unwrap();
    let existing = slot(group.id, (9, 0), (10, 0));
    let roster = InMemoryRoster::new(vec![group], vec![existing]);
    let mut timeline = ShiftTimeline::new(roster, &settings(), monday_midnight());
    timeline.resize(WIDTH, HEIGHT);

    // Row 0 holds the slot; only row 1 is the add row
    timeline.on_pointer_down(pos2(x_at(14, 0), row_y(0)));
    assert_eq!(timeline.pointer_state(), PointerState::Idle);
    timeline.on_pointer_up(pos2(x_at(16, 0), row_y(0)));

    assert_eq!(timeline.collaborator().slots().len(), 1);
}

#[test]
fn test_hover_enters_and_leaves_slot() {
    let group = Group::new("Kitchen").unwrap();
    let existing = slot(group.id, (9, 0), (10, 0));
    let roster = InMemoryRoster::new(vec![group], vec![existing.clone()]);
    let mut timeline = ShiftTimeline::new(roster, &settings(), monday_midnight());
    timeline.resize(WIDTH, HEIGHT);

    timeline.on_pointer_move(pos2(x_at(9, 30), row_y(0)));
    assert!(matches!(
        timeline.pointer_state(),
        PointerState::HoveringSlot { slot, .. } if slot == existing.id
    ));

    timeline.on_pointer_move(pos2(x_at(11, 0), row_y(0)));
    assert_eq!(timeline.pointer_state(), PointerState::Idle);
}

#[test]
fn test_toolbox_close_button_keeps_slot() {
    let group = Group::new("Kitchen").unwrap();
    let existing = slot(group.id, (9, 0), (17, 0));
    let roster = InMemoryRoster::new(vec![group], vec![existing.clone()]);
    let mut timeline = ShiftTimeline::new(roster, &settings(), monday_midnight());
    timeline.resize(WIDTH, HEIGHT);

    let rect = timeline.shift_rect(&existing.id).unwrap();
    timeline.on_pointer_down(rect.center());
    timeline.on_pointer_up(rect.center());
    assert_eq!(timeline.selection().map(|s| s.slot), Some(existing.id));

    let toolbox = timeline.toolbox_rect().unwrap();
    timeline.on_pointer_down(toolbox.min + vec2(80.0, 10.0));

    assert!(!timeline.has_toolbox());
    assert!(timeline.selection().is_none());
    assert_eq!(timeline.collaborator().slots().len(), 1);
}

#[test]
fn test_click_outside_toolbox_dismisses_it() {
    let group = Group::new("Kitchen").unwrap();
    let existing = slot(group.id, (9, 0), (17, 0));
    let roster = InMemoryRoster::new(vec![group], vec![existing.clone()]);
    let mut timeline = ShiftTimeline::new(roster, &settings(), monday_midnight());
    timeline.resize(WIDTH, HEIGHT);

    let rect = timeline.shift_rect(&existing.id).unwrap();
    timeline.on_pointer_down(rect.center());
    timeline.on_pointer_up(rect.center());
    assert!(timeline.has_toolbox());

    timeline.on_pointer_down(pos2(x_at(20, 0), row_y(0)));

    assert!(!timeline.has_toolbox());
    assert_eq!(timeline.collaborator().slots().len(), 1);
}
