//! Interval-overlap row assignment.
//!
//! Lays out one group's time-slots into the smallest set of rows such that
//! no two overlapping slots share a row. Slots are processed in a canonical
//! order (start, then end, then id) so the same slot set always produces the
//! same assignment regardless of the order it was supplied in. Greedy
//! placement in start order is optimal for intervals: the number of rows in
//! use equals the largest number of slots overlapping at any instant.

use std::collections::HashMap;

use crate::models::interval::Interval;
use crate::models::roster::{SlotId, TimeSlot};

/// Row layout for a single group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowAssignment {
    /// Slot ids per local row. The last row is always the empty "add" row.
    rows: Vec<Vec<SlotId>>,
    row_of: HashMap<SlotId, usize>,
}

impl RowAssignment {
    /// Rows in the group, including the reserved empty row at the bottom.
    pub fn row_count(&self) -> usize {
        self.rows.len().max(1)
    }

    /// Index of the reserved empty row used for drag-to-create.
    pub fn add_row(&self) -> usize {
        self.row_count() - 1
    }

    pub fn row_of(&self, slot: &SlotId) -> Option<usize> {
        self.row_of.get(slot).copied()
    }

    /// Slots in `row`; empty for the add row or any out-of-range index.
    pub fn row(&self, row: usize) -> &[SlotId] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[SlotId]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn slot_count(&self) -> usize {
        self.row_of.len()
    }
}

/// Assign every slot the lowest row not used by an already placed slot it overlaps.
pub fn assign_rows<'a, I>(slots: I) -> RowAssignment
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    let mut ordered: Vec<&TimeSlot> = slots.into_iter().collect();
    ordered.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut placed: Vec<(Interval, usize)> = Vec::with_capacity(ordered.len());
    let mut rows: Vec<Vec<SlotId>> = Vec::new();
    let mut row_of = HashMap::with_capacity(ordered.len());
    let mut taken: Vec<bool> = Vec::new();

    for slot in ordered {
        if row_of.contains_key(&slot.id) {
            continue;
        }
        let interval = slot.interval();

        taken.clear();
        taken.resize(rows.len(), false);
        for (other, row) in &placed {
            if interval.overlaps(other) {
                taken[*row] = true;
            }
        }

        let row = taken.iter().position(|used| !used).unwrap_or(rows.len());
        if row == rows.len() {
            rows.push(Vec::new());
        }
        rows[row].push(slot.id);
        row_of.insert(slot.id, row);
        placed.push((interval, row));
    }

    // Reserved empty row for drag-to-create.
    rows.push(Vec::new());

    RowAssignment { rows, row_of }
}

/// Largest number of intervals that pairwise overlap (the clique size).
///
/// Every clique of intervals shares the start point of its latest-starting
/// member, so it is enough to count, for each interval, the intervals that
/// overlap it and start no later than it does.
pub fn max_overlap_depth<'a, I>(intervals: I) -> usize
where
    I: IntoIterator<Item = &'a Interval>,
{
    let intervals: Vec<&Interval> = intervals.into_iter().collect();
    (0..intervals.len())
        .map(|i| {
            let current = intervals[i];
            1 + intervals
                .iter()
                .enumerate()
                .filter(|(j, other)| {
                    *j != i && other.start <= current.start && other.overlaps(current)
                })
                .count()
        })
        .max()
        .unwrap_or(0)
}
