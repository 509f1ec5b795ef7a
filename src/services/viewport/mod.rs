//! Coordinate and pagination state.
//!
//! Converts between the semantic axes (time, global row) and screen pixels,
//! tracks the current vertical page, and derives scrollbar geometry from the
//! hard date bounds. Every setter that can move geometry raises a redraw
//! request; the owner collects it once per event turn with
//! [`TimelineViewport::take_redraw_request`].

use chrono::{NaiveDate, NaiveDateTime};
use std::ops::Range;

use crate::models::roster::ViewWindow;
use crate::models::settings::TimelineSettings;
use crate::utils::date::{
    add_days, days_between, from_minutes_since_epoch, minutes_since_epoch, start_of_day,
    MINUTES_PER_DAY,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineViewport {
    screen_width: f32,
    screen_height: f32,
    header_height: f32,
    label_column_width: f32,
    days_shown: u32,
    rows_per_page: u32,
    pixels_per_minute: f32,
    row_height: f32,
    current_page: usize,
    window_start: NaiveDateTime,
    hard_lower_bound: Option<NaiveDate>,
    hard_upper_bound: Option<NaiveDate>,
    redraw_requested: bool,
}

impl TimelineViewport {
    pub fn new(settings: &TimelineSettings, window_start: NaiveDateTime) -> Self {
        let mut viewport = Self {
            screen_width: 0.0,
            screen_height: 0.0,
            header_height: settings.header_height,
            label_column_width: settings.label_column_width,
            days_shown: settings.days_shown.max(1),
            rows_per_page: settings.rows_per_page.max(1),
            pixels_per_minute: 0.0,
            row_height: 0.0,
            current_page: 0,
            window_start,
            hard_lower_bound: settings.hard_lower_bound,
            hard_upper_bound: settings.hard_upper_bound,
            redraw_requested: true,
        };
        viewport.recompute_scale();
        viewport
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_width, self.screen_height)
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn label_column_width(&self) -> f32 {
        self.label_column_width
    }

    pub fn days_shown(&self) -> u32 {
        self.days_shown
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.pixels_per_minute
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn window_start(&self) -> NaiveDateTime {
        self.window_start
    }

    /// The displayed range: `days_shown` days from the window start.
    pub fn window(&self) -> ViewWindow {
        ViewWindow::new(self.window_start, add_days(self.window_start, self.days_shown))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if self.screen_width == width && self.screen_height == height {
            return;
        }
        self.screen_width = width.max(0.0);
        self.screen_height = height.max(0.0);
        self.recompute_scale();
    }

    pub fn set_days_shown(&mut self, days: u32) {
        let days = days.max(1);
        if self.days_shown != days {
            self.days_shown = days;
            self.recompute_scale();
        }
    }

    pub fn set_rows_per_page(&mut self, rows: u32) {
        let rows = rows.max(1);
        if self.rows_per_page != rows {
            self.rows_per_page = rows;
            self.recompute_scale();
        }
    }

    pub fn set_window_start(&mut self, start: NaiveDateTime) {
        if self.window_start != start {
            self.window_start = start;
            self.redraw_requested = true;
        }
    }

    pub fn set_hard_bounds(&mut self, lower: Option<NaiveDate>, upper: Option<NaiveDate>) {
        self.hard_lower_bound = lower;
        self.hard_upper_bound = upper;
        self.redraw_requested = true;
    }

    pub fn hard_bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.hard_lower_bound, self.hard_upper_bound)
    }

    fn recompute_scale(&mut self) {
        let minutes = self.days_shown as f32 * MINUTES_PER_DAY as f32;
        self.pixels_per_minute = ((self.screen_width - self.label_column_width) / minutes).max(0.0);
        self.row_height =
            ((self.screen_height - self.header_height) / (self.rows_per_page as f32 + 1.0)).max(0.0);
        self.redraw_requested = true;
    }

    /// `(time - windowStart) * pixelsPerMinute + labelColumnWidth`
    pub fn pixel_x(&self, time: NaiveDateTime) -> f32 {
        let minutes = minutes_since_epoch(time) - minutes_since_epoch(self.window_start);
        minutes as f32 * self.pixels_per_minute + self.label_column_width
    }

    /// Time under screen column `x`, floored to the minute.
    pub fn time_at_x(&self, x: f32) -> NaiveDateTime {
        if self.pixels_per_minute <= 0.0 {
            return self.window_start;
        }
        let minutes = ((x - self.label_column_width) / self.pixels_per_minute).floor() as i64;
        from_minutes_since_epoch(minutes_since_epoch(self.window_start) + minutes)
    }

    /// `(viewportHeight - headerHeight - rowHeight) * currentPage`
    pub fn page_offset_y(&self) -> f32 {
        (self.screen_height - self.header_height - self.row_height) * self.current_page as f32
    }

    /// Top edge of a row given its group's first global row.
    pub fn pixel_y(&self, group_row_offset: usize, row_in_group: usize) -> f32 {
        self.row_top(group_row_offset + row_in_group)
    }

    /// Top edge of a global row on the current page.
    pub fn row_top(&self, global_row: usize) -> f32 {
        self.header_height + global_row as f32 * self.row_height - self.page_offset_y()
    }

    /// Global row under screen row `y`, or `None` inside the header.
    pub fn global_row_at_y(&self, y: f32) -> Option<usize> {
        if y < self.header_height || self.row_height <= 0.0 {
            return None;
        }
        let row = ((y - self.header_height + self.page_offset_y()) / self.row_height).floor();
        (row >= 0.0).then_some(row as usize)
    }

    pub fn page_count(&self, total_rows: usize) -> usize {
        let per_page = self.rows_per_page as usize;
        total_rows.div_ceil(per_page).max(1)
    }

    /// Global rows drawn on `page`; one row overlaps with the next page.
    pub fn rows_on_page(&self, page: usize, total_rows: usize) -> Range<usize> {
        let per_page = self.rows_per_page as usize;
        let first = (page * per_page).min(total_rows);
        first..(first + per_page + 1).min(total_rows)
    }

    /// Switch page, clamped to the pages `total_rows` needs.
    pub fn set_page(&mut self, page: usize, total_rows: usize) {
        let page = page.min(self.page_count(total_rows) - 1);
        if self.current_page != page {
            self.current_page = page;
            self.redraw_requested = true;
        }
    }

    pub fn next_page(&mut self, total_rows: usize) {
        self.set_page(self.current_page + 1, total_rows);
    }

    pub fn previous_page(&mut self, total_rows: usize) {
        self.set_page(self.current_page.saturating_sub(1), total_rows);
    }

    fn bound_minutes(&self) -> Option<(i64, i64)> {
        let lower = self.hard_lower_bound?;
        let upper = self.hard_upper_bound?;
        Some((
            minutes_since_epoch(start_of_day(lower)),
            minutes_since_epoch(start_of_day(upper)),
        ))
    }

    /// `totalDaysInHardBounds / daysShown`, zero without both bounds.
    pub fn scroll_length(&self) -> f32 {
        match (self.hard_lower_bound, self.hard_upper_bound) {
            (Some(lower), Some(upper)) => {
                days_between(lower, upper) as f32 / self.days_shown as f32
            }
            _ => 0.0,
        }
    }

    /// `daysShown`, zero without both bounds.
    pub fn scroll_handle_length(&self) -> f32 {
        if self.bound_minutes().is_some() {
            self.days_shown as f32
        } else {
            0.0
        }
    }

    /// `(windowStart - lower) / (upper - lower)`, zero without both bounds.
    pub fn scroll_position(&self) -> f32 {
        match self.bound_minutes() {
            Some((lower, upper)) if upper > lower => {
                (minutes_since_epoch(self.window_start) - lower) as f32 / (upper - lower) as f32
            }
            _ => 0.0,
        }
    }

    /// Move the window start to the scrollbar position `fraction` (0..=1).
    /// Ignored without both bounds.
    pub fn scroll_to(&mut self, fraction: f32) {
        let Some((lower, upper)) = self.bound_minutes() else {
            return;
        };
        let span = (upper - lower).max(0);
        let offset = (f64::from(fraction.clamp(0.0, 1.0)) * span as f64).round() as i64;
        let latest = (upper - i64::from(self.days_shown) * MINUTES_PER_DAY).max(lower);
        let start = (lower + offset).min(latest);
        self.set_window_start(from_minutes_since_epoch(start));
    }

    /// True once per batch of geometry changes.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
