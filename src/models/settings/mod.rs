// Settings module
// Timeline display and editing configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User-tunable timeline configuration, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Number of days visible horizontally
    pub days_shown: u32,
    /// Number of rows visible vertically per page
    pub rows_per_page: u32,
    /// Drag-created slots snap to multiples of this many minutes
    pub edit_granularity_minutes: u32,
    pub header_height: f32,
    pub label_column_width: f32,
    /// Earliest date the scrollbar can reach
    pub hard_lower_bound: Option<NaiveDate>,
    /// Latest date the scrollbar can reach
    pub hard_upper_bound: Option<NaiveDate>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            days_shown: 7,
            rows_per_page: 10,
            edit_granularity_minutes: 30,
            header_height: 40.0,
            label_column_width: 120.0,
            hard_lower_bound: None,
            hard_upper_bound: None,
        }
    }
}

impl TimelineSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.days_shown == 0 {
            return Err("days_shown must be at least 1".to_string());
        }

        if self.rows_per_page == 0 {
            return Err("rows_per_page must be at least 1".to_string());
        }

        if self.edit_granularity_minutes == 0 || self.edit_granularity_minutes > 24 * 60 {
            return Err("edit_granularity_minutes must be between 1 and 1440".to_string());
        }

        if self.header_height < 0.0 || self.label_column_width < 0.0 {
            return Err("header_height and label_column_width cannot be negative".to_string());
        }

        if let (Some(lower), Some(upper)) = (self.hard_lower_bound, self.hard_upper_bound) {
            if lower >= upper {
                return Err("hard_lower_bound must be before hard_upper_bound".to_string());
            }
        }

        Ok(())
    }
}
