// Shift Timeline
// Main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use shift_timeline::services::roster::InMemoryRoster;
use shift_timeline::services::settings::SettingsService;
use shift_timeline::ui_egui::{ShiftTimeline, TimelineApp};
use shift_timeline::utils::date::start_of_day;

fn main() -> Result<()> {
    env_logger::init();

    log::info!("Starting Shift Timeline");

    let settings_path = match SettingsService::default_path() {
        Ok(path) => Some(path),
        Err(err) => {
            log::warn!("Settings will not be persisted: {}", err);
            None
        }
    };
    let settings = settings_path
        .as_deref()
        .map(SettingsService::load_or_default)
        .unwrap_or_default();

    // Optional roster snapshot: shift-timeline [roster.json]
    let roster = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => InMemoryRoster::load_json(&path)
            .with_context(|| format!("Failed to load roster from {}", path.display()))?,
        None => {
            log::info!("No roster file given; starting with an empty roster");
            InMemoryRoster::default()
        }
    };

    let window_start = start_of_day(Local::now().date_naive());
    let timeline = ShiftTimeline::new(roster, &settings, window_start);
    let app = TimelineApp::new(timeline, settings, settings_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Shift Timeline")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shift Timeline",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run the timeline window: {}", err))
}
