use std::path::PathBuf;

use chrono::Duration;
use egui::{pos2, Pos2, Sense};

use crate::models::settings::TimelineSettings;
use crate::services::roster::InMemoryRoster;
use crate::services::settings::SettingsService;
use crate::ui_egui::painter_surface::EguiSurface;
use crate::ui_egui::timeline::ShiftTimeline;

const GRANULARITY_CHOICES: [u32; 4] = [15, 30, 60, 120];
const MAX_DAYS_SHOWN: u32 = 31;

/// Desktop shell around [`ShiftTimeline`]: toolbar plus the timeline canvas.
pub struct TimelineApp {
    timeline: ShiftTimeline<InMemoryRoster>,
    settings: TimelineSettings,
    /// Where settings are written back on exit
    settings_path: Option<PathBuf>,
    /// Last pointer position inside the canvas, in canvas coordinates
    last_pointer: Option<Pos2>,
    /// Primary button went down inside the canvas and is still held
    pointer_captured: bool,
}

impl TimelineApp {
    pub fn new(
        timeline: ShiftTimeline<InMemoryRoster>,
        settings: TimelineSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            timeline,
            settings,
            settings_path,
            last_pointer: None,
            pointer_captured: false,
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let days = self.timeline.viewport().days_shown();
            let start = self.timeline.viewport().window_start();
            let step = Duration::days(i64::from(days));

            if ui.button("◀ Earlier").clicked() {
                self.timeline.set_view_window(start - step, start);
            }
            ui.label(start.format("%a %d %b %Y").to_string());
            if ui.button("Later ▶").clicked() {
                self.timeline.set_view_window(start + step, start + step + step);
            }

            ui.separator();

            let mut days_shown = days;
            ui.label("Days:");
            if ui
                .add(egui::DragValue::new(&mut days_shown).range(1..=MAX_DAYS_SHOWN))
                .changed()
            {
                self.timeline.set_days_shown(days_shown);
                self.settings.days_shown = days_shown;
            }

            ui.separator();

            let mut granularity = self.settings.edit_granularity_minutes;
            egui::ComboBox::from_label("Snap")
                .selected_text(format!("{} min", granularity))
                .show_ui(ui, |ui| {
                    for choice in GRANULARITY_CHOICES {
                        ui.selectable_value(&mut granularity, choice, format!("{} min", choice));
                    }
                });
            if granularity != self.settings.edit_granularity_minutes {
                self.settings.edit_granularity_minutes = granularity;
                self.timeline.set_edit_granularity_minutes(granularity);
            }

            ui.separator();

            if ui.button("▲").clicked() {
                self.timeline.previous_page();
            }
            ui.label(format!(
                "Page {}/{}",
                self.timeline.current_page() + 1,
                self.timeline.page_count()
            ));
            if ui.button("▼").clicked() {
                self.timeline.next_page();
            }

            ui.separator();

            if ui.button("Reload").clicked() {
                self.timeline.reload();
            }
        });
    }

    fn render_timeline(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.timeline.resize(rect.width(), rect.height());

        let (latest, pressed, released) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        match latest {
            Some(pos) if rect.contains(pos) || self.pointer_captured => {
                let local = pos2(pos.x - rect.min.x, pos.y - rect.min.y);
                if pressed && rect.contains(pos) {
                    self.pointer_captured = true;
                    self.timeline.on_pointer_down(local);
                } else if released && self.pointer_captured {
                    self.pointer_captured = false;
                    self.timeline.on_pointer_up(local);
                } else if self.last_pointer != Some(local) {
                    self.timeline.on_pointer_move(local);
                }
                self.last_pointer = Some(local);
            }
            _ => {
                if self.last_pointer.take().is_some() {
                    self.pointer_captured = false;
                    self.timeline.on_pointer_leave();
                }
            }
        }

        let mut surface = EguiSurface::new(&painter, rect.min);
        self.timeline.draw(&mut surface);
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("timeline_toolbar").show(ctx, |ui| self.render_toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.render_timeline(ui));

        if self.timeline.flush_redraw() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let Some(path) = &self.settings_path else {
            return;
        };
        match SettingsService::save(path, &self.settings) {
            Ok(()) => log::info!("Saved timeline settings to {}", path.display()),
            Err(err) => log::warn!("Failed to save timeline settings: {}", err),
        }
    }
}
