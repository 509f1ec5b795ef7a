// Property-based tests for row assignment and the windowed projection
// Random slot sets must always produce non-overlapping, minimal, stable rows

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use shift_timeline::models::interval::Interval;
use shift_timeline::models::roster::{Group, GroupId, TimeSlot, ViewWindow};
use shift_timeline::services::layout::{assign_rows, max_overlap_depth};
use shift_timeline::services::projection::RowProjection;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Slots within three days, 15-minute aligned so ties are frequent.
fn slots_strategy(group: GroupId) -> impl Strategy<Value = Vec<TimeSlot>> {
    prop::collection::vec((0i64..288, 0i64..48), 0..40).prop_map(move |spans| {
        spans
            .into_iter()
            .map(|(start, length)| {
                let start = base() + Duration::minutes(start * 15);
                let end = start + Duration::minutes(length * 15);
                TimeSlot::new(group, start, end).unwrap()
            })
            .collect()
    })
}

fn group_and_slots() -> impl Strategy<Value = (GroupId, Vec<TimeSlot>)> {
    Just(GroupId::new()).prop_flat_map(|group| (Just(group), slots_strategy(group)))
}

proptest! {
    /// Property: no two slots sharing a row overlap
    #[test]
    fn prop_rows_never_overlap((_, slots) in group_and_slots()) {
        let assignment = assign_rows(&slots);
        for row in assignment.rows() {
            let members: Vec<&TimeSlot> =
                slots.iter().filter(|slot| row.contains(&slot.id)).collect();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    prop_assert!(
                        !a.interval().overlaps(&b.interval()),
                        "{:?} and {:?} share a row",
                        a,
                        b
                    );
                }
            }
        }
        prop_assert_eq!(assignment.slot_count(), slots.len());
    }

    /// Property: rows used never exceed the largest overlapping clique, plus the add row
    #[test]
    fn prop_row_count_is_minimal((_, slots) in group_and_slots()) {
        let assignment = assign_rows(&slots);
        let intervals: Vec<Interval> = slots.iter().map(TimeSlot::interval).collect();
        let depth = max_overlap_depth(&intervals);

        prop_assert_eq!(assignment.row_count(), depth + 1);
        prop_assert!(assignment.row(assignment.add_row()).is_empty());
    }

    /// Property: assignment depends only on the slot set, not on its order
    #[test]
    fn prop_assignment_is_idempotent((_, slots) in group_and_slots()) {
        let first = assign_rows(&slots);
        let again = assign_rows(&slots);
        let reversed = assign_rows(slots.iter().rev());

        prop_assert_eq!(&first, &again);
        for slot in &slots {
            prop_assert_eq!(first.row_of(&slot.id), reversed.row_of(&slot.id));
        }
    }

    /// Property: visible rows are subsets of all rows and overlap the window
    #[test]
    fn prop_visible_rows_are_contained(
        (group, slots) in group_and_slots(),
        window_start in 0i64..72,
        window_hours in 1i64..48,
    ) {
        let start = base() + Duration::hours(window_start);
        let window = ViewWindow::new(start, start + Duration::hours(window_hours));
        let mut projection = RowProjection::new(window);
        projection.set_groups(vec![Group { id: group, title: "Kitchen".to_string() }]);
        projection.set_slots(slots);

        let all = projection.rows().to_vec();
        let visible = projection.visible_rows().to_vec();
        prop_assert_eq!(all.len(), visible.len());
        for (all_row, visible_row) in all.iter().zip(&visible) {
            for slot in visible_row {
                prop_assert!(all_row.contains(slot));
                prop_assert!(window.shows(slot));
            }
            for slot in all_row {
                prop_assert_eq!(visible_row.contains(slot), window.shows(slot));
            }
        }
    }

    /// Property: a group's row count delta shifts every later group by exactly that delta
    #[test]
    fn prop_row_offsets_shift_by_delta(
        (first, slots) in group_and_slots(),
        start in 0i64..288,
        length in 0i64..48,
    ) {
        let later = Group::new("Bar").unwrap();
        let last = Group::new("Front desk").unwrap();
        let window = ViewWindow::new(base(), base() + Duration::days(3));
        let mut projection = RowProjection::new(window);
        projection.set_groups(vec![
            Group { id: first, title: "Kitchen".to_string() },
            later.clone(),
            last.clone(),
        ]);
        projection.set_slots(slots);
        // Warm both caches so the incremental path is exercised
        projection.visible_rows();

        let count_before = projection.group_row_count(&first).unwrap();
        let later_before = projection.group_start(&later.id).unwrap();
        let last_before = projection.group_start(&last.id).unwrap();
        let total_before = projection.row_count();

        let slot_start = base() + Duration::minutes(start * 15);
        let added = TimeSlot::new(first, slot_start, slot_start + Duration::minutes(length * 15)).unwrap();
        projection.add_slot(added.clone());

        let delta = projection.group_row_count(&first).unwrap() as isize - count_before as isize;
        prop_assert!(delta == 0 || delta == 1);
        prop_assert_eq!(projection.group_start(&later.id).unwrap() as isize, later_before as isize + delta);
        prop_assert_eq!(projection.group_start(&last.id).unwrap() as isize, last_before as isize + delta);
        prop_assert_eq!(projection.row_count() as isize, total_before as isize + delta);

        let row = projection.row_of_slot(&added.id).unwrap();
        prop_assert!(projection.row(row).contains(&added));
        prop_assert_eq!(projection.rows().len(), projection.row_count());
    }
}
