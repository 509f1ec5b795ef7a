//! Windowed row projection.
//!
//! Owns the per-group row tables produced by [`assign_rows`] and concatenates
//! them, in group order, into one global row list. A second list holds, for
//! every global row, only the slots overlapping the current [`ViewWindow`].
//! Both lists are derived caches: mutations invalidate or patch them and the
//! next read recomputes whatever is stale.

use std::collections::HashMap;
use std::ops::Range;

use crate::models::roster::{Group, GroupId, SlotId, TimeSlot, ViewWindow};
use crate::services::layout::{assign_rows, RowAssignment};
use crate::utils::cache::Derived;

type Rows = Vec<Vec<TimeSlot>>;

/// Row tables for every group plus the window-filtered projection.
#[derive(Debug, Clone)]
pub struct RowProjection {
    groups: Vec<Group>,
    /// Tracked slots per group, including groups not (yet) in `groups`
    slots: HashMap<GroupId, HashMap<SlotId, TimeSlot>>,
    slot_groups: HashMap<SlotId, GroupId>,
    layouts: HashMap<GroupId, RowAssignment>,
    /// First global row of each group
    group_start: HashMap<GroupId, usize>,
    /// One past the last global row of each group
    group_end: HashMap<GroupId, usize>,
    total_rows: usize,
    window: ViewWindow,
    all_rows: Derived<Rows>,
    visible_rows: Derived<Rows>,
}

impl RowProjection {
    pub fn new(window: ViewWindow) -> Self {
        Self {
            groups: Vec::new(),
            slots: HashMap::new(),
            slot_groups: HashMap::new(),
            layouts: HashMap::new(),
            group_start: HashMap::new(),
            group_end: HashMap::new(),
            total_rows: 0,
            window,
            all_rows: Derived::new(),
            visible_rows: Derived::new(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == *id)
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    /// Total number of global rows across all groups.
    pub fn row_count(&self) -> usize {
        self.total_rows
    }

    pub fn slot(&self, id: &SlotId) -> Option<&TimeSlot> {
        let group = self.slot_groups.get(id)?;
        self.slots.get(group)?.get(id)
    }

    pub fn slot_count(&self) -> usize {
        self.slot_groups.len()
    }

    pub fn group_start(&self, group: &GroupId) -> Option<usize> {
        self.group_start.get(group).copied()
    }

    pub fn group_end(&self, group: &GroupId) -> Option<usize> {
        self.group_end.get(group).copied()
    }

    /// Global row range covered by `group`.
    pub fn group_rows(&self, group: &GroupId) -> Option<Range<usize>> {
        Some(self.group_start(group)?..self.group_end(group)?)
    }

    /// Number of rows in `group`, including its reserved add row.
    pub fn group_row_count(&self, group: &GroupId) -> Option<usize> {
        self.layouts.get(group).map(RowAssignment::row_count)
    }

    /// Global index of the reserved empty row at the bottom of `group`.
    pub fn add_row(&self, group: &GroupId) -> Option<usize> {
        self.group_end(group).map(|end| end - 1)
    }

    /// Resolve a global row into its group and the row index local to it.
    pub fn locate_row(&self, global_row: usize) -> Option<(&Group, usize)> {
        self.groups.iter().find_map(|group| {
            let rows = self.group_rows(&group.id)?;
            rows.contains(&global_row)
                .then(|| (group, global_row - rows.start))
        })
    }

    /// Global row a slot is laid out on, if its group is known.
    pub fn row_of_slot(&self, id: &SlotId) -> Option<usize> {
        let group = self.slot_groups.get(id)?;
        let local = self.layouts.get(group)?.row_of(id)?;
        Some(self.group_start(group)? + local)
    }

    pub fn set_groups(&mut self, groups: Vec<Group>) {
        self.groups = groups;
        self.relayout_all();
    }

    /// Replace every tracked slot.
    pub fn set_slots(&mut self, slots: Vec<TimeSlot>) {
        self.slots.clear();
        self.slot_groups.clear();
        for slot in slots {
            self.track(slot);
        }
        self.relayout_all();
    }

    /// Track `slot` (replacing any slot with the same id) and relayout its group.
    pub fn add_slot(&mut self, slot: TimeSlot) {
        let group = slot.group;
        if let Some(previous) = self.untrack(&slot.id) {
            if previous.group != group {
                self.rebuild_group(&previous.group);
            }
        }
        self.track(slot);
        self.rebuild_group(&group);
    }

    /// Same as [`add_slot`](Self::add_slot); an existing slot is moved or resized in place.
    pub fn update_slot(&mut self, slot: TimeSlot) {
        self.add_slot(slot);
    }

    pub fn remove_slot(&mut self, id: &SlotId) -> Option<TimeSlot> {
        let removed = self.untrack(id)?;
        self.rebuild_group(&removed.group);
        Some(removed)
    }

    /// Rerun row assignment for one group and splice the result into the
    /// global row list. A change in the group's row count shifts every later
    /// group and invalidates both row caches.
    pub fn rebuild_group(&mut self, group_id: &GroupId) {
        let Some(index) = self.groups.iter().position(|group| group.id == *group_id) else {
            if self.slots.get(group_id).is_some_and(|slots| !slots.is_empty()) {
                log::warn!("Slots reference unknown group {}; they are not laid out", group_id);
            }
            return;
        };

        let assignment = assign_rows(self.slots.get(group_id).into_iter().flat_map(|s| s.values()));
        let old_count = self.group_row_count(group_id).unwrap_or(0);
        let new_count = assignment.row_count();
        self.layouts.insert(*group_id, assignment);

        if new_count != old_count {
            let delta = new_count as isize - old_count as isize;
            log::debug!(
                "Group {} row count {} -> {}; shifting later groups by {}",
                group_id,
                old_count,
                new_count,
                delta
            );
            if let Some(end) = self.group_end.get_mut(group_id) {
                *end = end.saturating_add_signed(delta);
            }
            for later in &self.groups[index + 1..] {
                if let Some(start) = self.group_start.get_mut(&later.id) {
                    *start = start.saturating_add_signed(delta);
                }
                if let Some(end) = self.group_end.get_mut(&later.id) {
                    *end = end.saturating_add_signed(delta);
                }
            }
            self.total_rows = self.total_rows.saturating_add_signed(delta);
            self.all_rows.invalidate();
            self.visible_rows.invalidate();
            return;
        }

        let Some(range) = self.group_rows(group_id) else {
            return;
        };
        let group_rows = self.materialize_group(group_id);
        if let Some(all) = self.all_rows.peek_mut() {
            for (cached, row) in all[range.clone()].iter_mut().zip(&group_rows) {
                cached.clone_from(row);
            }
        }
        let window = self.window;
        if let Some(visible) = self.visible_rows.peek_mut() {
            for (cached, row) in visible[range].iter_mut().zip(&group_rows) {
                *cached = filter_row(row, &window);
            }
        }
    }

    /// Move the view window; only the visible projection is invalidated.
    pub fn set_window(&mut self, window: ViewWindow) {
        if self.window != window {
            self.window = window;
            self.visible_rows.invalidate();
        }
    }

    pub fn is_rows_dirty(&self) -> bool {
        self.all_rows.is_dirty()
    }

    pub fn is_visible_dirty(&self) -> bool {
        self.visible_rows.is_dirty()
    }

    /// Every global row with all of its slots.
    pub fn rows(&mut self) -> &[Vec<TimeSlot>] {
        self.ensure_rows();
        self.all_rows.peek().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every global row with only the slots overlapping the window.
    pub fn visible_rows(&mut self) -> &[Vec<TimeSlot>] {
        self.ensure_visible();
        self.visible_rows.peek().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Slots of a global row; empty when out of range.
    pub fn row(&mut self, global_row: usize) -> &[TimeSlot] {
        self.rows().get(global_row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Window-filtered slots of a global row; empty when out of range.
    pub fn visible_row(&mut self, global_row: usize) -> &[TimeSlot] {
        self.visible_rows()
            .get(global_row)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn ensure_rows(&mut self) {
        if self.all_rows.is_dirty() {
            let rows = self.materialize_all();
            self.all_rows.get_or_compute(|| rows);
        }
    }

    fn ensure_visible(&mut self) {
        if self.visible_rows.is_dirty() {
            self.ensure_rows();
            let window = self.window;
            let all = self.all_rows.peek().map(Vec::as_slice).unwrap_or(&[]);
            let visible: Rows = all.iter().map(|row| filter_row(row, &window)).collect();
            self.visible_rows.get_or_compute(|| visible);
        }
    }

    fn track(&mut self, slot: TimeSlot) {
        self.slot_groups.insert(slot.id, slot.group);
        self.slots.entry(slot.group).or_default().insert(slot.id, slot);
    }

    fn untrack(&mut self, id: &SlotId) -> Option<TimeSlot> {
        let group = self.slot_groups.remove(id)?;
        self.slots.get_mut(&group)?.remove(id)
    }

    fn relayout_all(&mut self) {
        self.layouts.clear();
        self.group_start.clear();
        self.group_end.clear();

        let mut offset = 0;
        for group in &self.groups {
            let assignment =
                assign_rows(self.slots.get(&group.id).into_iter().flat_map(|s| s.values()));
            let count = assignment.row_count();
            self.group_start.insert(group.id, offset);
            self.group_end.insert(group.id, offset + count);
            self.layouts.insert(group.id, assignment);
            offset += count;
        }
        self.total_rows = offset;

        for (group, slots) in &self.slots {
            if !slots.is_empty() && !self.layouts.contains_key(group) {
                log::warn!(
                    "{} slot(s) reference unknown group {}; they are not laid out",
                    slots.len(),
                    group
                );
            }
        }

        log::debug!(
            "Laid out {} group(s) into {} row(s)",
            self.groups.len(),
            self.total_rows
        );
        self.all_rows.invalidate();
        self.visible_rows.invalidate();
    }

    fn materialize_group(&self, group: &GroupId) -> Rows {
        let (Some(layout), Some(slots)) = (self.layouts.get(group), self.slots.get(group)) else {
            return vec![Vec::new(); self.group_row_count(group).unwrap_or(0)];
        };
        layout
            .rows()
            .map(|row| row.iter().filter_map(|id| slots.get(id).cloned()).collect())
            .collect()
    }

    fn materialize_all(&self) -> Rows {
        let mut rows = Vec::with_capacity(self.total_rows);
        for group in &self.groups {
            rows.extend(self.materialize_group(&group.id));
        }
        rows
    }
}

fn filter_row(row: &[TimeSlot], window: &ViewWindow) -> Vec<TimeSlot> {
    row.iter().filter(|slot| window.shows(slot)).cloned().collect()
}
