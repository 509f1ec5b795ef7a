// Roster module
// Groups (spots) and time-slots (shifts) as read from the external roster

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::interval::Interval;
use crate::utils::date::start_of_day;

/// Stable identity of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a time-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub Uuid);

impl SlotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named lane (e.g. a work spot) that owns zero or more slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
}

impl Group {
    /// Create a group with a fresh identity.
    pub fn new(title: impl Into<String>) -> Result<Self, String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("Group title cannot be empty".to_string());
        }
        Ok(Self {
            id: GroupId::new(),
            title,
        })
    }
}

/// A time-bounded record (e.g. a shift) belonging to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    pub group: GroupId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    /// Create a slot with a fresh identity.
    ///
    /// Zero-length slots are allowed; an end before the start is not.
    pub fn new(group: GroupId, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, String> {
        if end < start {
            return Err("Time-slot end must not be before its start".to_string());
        }
        Ok(Self {
            id: SlotId::new(),
            group,
            start,
            end,
        })
    }

    pub fn interval(&self) -> Interval {
        Interval::from_datetimes(self.start, self.end)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// The displayed half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Window covering `days` whole days from midnight of `first_day`.
    pub fn from_days(first_day: NaiveDate, days: u32) -> Self {
        let start = start_of_day(first_day);
        Self::new(start, start + chrono::Duration::days(i64::from(days)))
    }

    pub fn interval(&self) -> Interval {
        Interval::from_datetimes(self.start, self.end)
    }

    /// True if `slot` overlaps this window.
    pub fn shows(&self, slot: &TimeSlot) -> bool {
        self.interval().overlaps(&slot.interval())
    }
}
