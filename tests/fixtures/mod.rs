// Test fixtures - reusable roster data
// Provides consistent groups, slots and screen geometry across all test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use shift_timeline::models::roster::{Group, GroupId, TimeSlot};
use shift_timeline::models::settings::TimelineSettings;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday 10 March 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
    }

    /// Monday at `h:m`
    pub fn at(h: u32, m: u32) -> NaiveDateTime {
        monday().and_hms_opt(h, m, 0).unwrap()
    }

    pub fn monday_midnight() -> NaiveDateTime {
        at(0, 0)
    }
}

/// Sample groups and slots
pub mod roster {
    use super::dates::at;
    use super::*;

    pub fn groups() -> Vec<Group> {
        ["Kitchen", "Bar", "Front desk"]
            .into_iter()
            .map(|title| Group::new(title).unwrap())
            .collect()
    }

    pub fn slot(group: GroupId, start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot::new(group, at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    /// A=[9:00,10:00), B=[9:30,10:30), C=[10:00,11:00)
    pub fn morning_overlap(group: GroupId) -> (TimeSlot, TimeSlot, TimeSlot) {
        (
            slot(group, (9, 0), (10, 0)),
            slot(group, (9, 30), (10, 30)),
            slot(group, (10, 0), (11, 0)),
        )
    }
}

/// Screen geometry shared by pointer tests.
///
/// One day across 1440 px after a 120 px label column gives 1 px per minute;
/// 9 rows per page below a 40 px header on a 540 px screen gives 50 px rows.
pub mod screen {
    use super::*;

    pub const WIDTH: f32 = 1560.0;
    pub const HEIGHT: f32 = 540.0;

    pub fn settings() -> TimelineSettings {
        TimelineSettings {
            days_shown: 1,
            rows_per_page: 9,
            ..Default::default()
        }
    }

    /// Screen x of Monday `h:m`
    pub fn x_at(h: u32, m: u32) -> f32 {
        120.0 + (h * 60 + m) as f32
    }

    /// Vertical centre of a global row on the first page
    pub fn row_y(row: usize) -> f32 {
        40.0 + 50.0 * row as f32 + 25.0
    }
}
