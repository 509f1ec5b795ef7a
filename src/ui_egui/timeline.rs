//! Timeline engine.
//!
//! [`ShiftTimeline`] ties the row projection, the viewport, the drawable
//! scene and the pointer state machine together behind the API a host UI
//! drives. Every mutation marks what it invalidated; the scene is rebuilt
//! lazily before the next draw or pointer event, and redraw requests reach
//! the roster once per event turn through [`ShiftTimeline::flush_redraw`].

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{pos2, vec2, Pos2, Rect, Stroke};

use crate::models::roster::{Group, SlotId, TimeSlot, ViewWindow};
use crate::models::settings::TimelineSettings;
use crate::services::projection::RowProjection;
use crate::services::roster::RosterCollaborator;
use crate::services::viewport::TimelineViewport;
use crate::ui_egui::drawable::{
    ContainerNode, Drawable, DrawableArena, DrawableKind, ShiftNode, Surface,
};
use crate::ui_egui::interaction::{
    CreatePreview, InteractionCommand, InteractionOutcome, MouseInteraction, PointerContext,
    PointerState, Selection,
};
use crate::ui_egui::palette::TimelinePalette;
use crate::utils::date::{format_time_range, minutes_since_epoch, MINUTES_PER_DAY};

/// Vertical gap between a shift box and its row's edges.
const SHIFT_PADDING: f32 = 2.0;
/// Shift boxes never shrink below this width so zero-length slots stay clickable.
const MIN_SHIFT_WIDTH: f32 = 4.0;

#[derive(Clone, Copy)]
enum PointerPhase {
    Down,
    Move,
    Up,
}

pub struct ShiftTimeline<C: RosterCollaborator> {
    collaborator: C,
    projection: RowProjection,
    viewport: TimelineViewport,
    arena: DrawableArena,
    interaction: MouseInteraction,
    palette: TimelinePalette,
    scene_dirty: bool,
    redraw_pending: bool,
}

impl<C: RosterCollaborator> ShiftTimeline<C> {
    /// Create an engine showing `settings.days_shown` days from `window_start`
    /// and load the roster's current groups and slots.
    pub fn new(collaborator: C, settings: &TimelineSettings, window_start: NaiveDateTime) -> Self {
        let viewport = TimelineViewport::new(settings, window_start);
        let projection = RowProjection::new(viewport.window());
        let mut timeline = Self {
            collaborator,
            projection,
            viewport,
            arena: DrawableArena::new(),
            interaction: MouseInteraction::new(settings.edit_granularity_minutes),
            palette: TimelinePalette::default(),
            scene_dirty: true,
            redraw_pending: true,
        };
        timeline.reload();
        timeline
    }

    /// Re-read groups and slots from the roster.
    pub fn reload(&mut self) {
        let groups = self.collaborator.list_groups();
        let slots = self.collaborator.list_time_slots();
        log::info!(
            "Loaded {} group(s) and {} slot(s) from roster",
            groups.len(),
            slots.len()
        );
        self.projection.set_groups(groups);
        self.projection.set_slots(slots);
        self.data_changed();
    }

    pub fn set_groups(&mut self, groups: Vec<Group>) {
        self.projection.set_groups(groups);
        self.data_changed();
    }

    pub fn set_shifts(&mut self, slots: Vec<TimeSlot>) {
        self.projection.set_slots(slots);
        self.data_changed();
    }

    /// Track a slot, replacing any slot with the same id.
    pub fn add_shift(&mut self, slot: TimeSlot) {
        self.projection.add_slot(slot);
        self.data_changed();
    }

    pub fn update_shift(&mut self, slot: TimeSlot) {
        self.projection.update_slot(slot);
        self.data_changed();
    }

    pub fn remove_shift(&mut self, id: &SlotId) -> Option<TimeSlot> {
        let removed = self.projection.remove_slot(id);
        if removed.is_some() {
            self.data_changed();
        }
        removed
    }

    /// Show `[start, end)`. The horizontal scale covers whole days.
    pub fn set_view_window(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        let window = ViewWindow::new(start, end);
        let minutes = minutes_since_epoch(window.end) - minutes_since_epoch(window.start);
        let days = (minutes + MINUTES_PER_DAY - 1) / MINUTES_PER_DAY;
        self.viewport.set_window_start(window.start);
        self.viewport
            .set_days_shown(u32::try_from(days.max(1)).unwrap_or(u32::MAX));
        self.projection.set_window(window);
        self.geometry_changed();
    }

    pub fn set_days_shown(&mut self, days: u32) {
        self.viewport.set_days_shown(days);
        self.projection.set_window(self.viewport.window());
        self.geometry_changed();
    }

    pub fn set_rows_per_page(&mut self, rows: u32) {
        self.viewport.set_rows_per_page(rows);
        self.clamp_page();
        self.geometry_changed();
    }

    pub fn set_page(&mut self, page: usize) {
        self.viewport.set_page(page, self.projection.row_count());
        self.geometry_changed();
    }

    pub fn next_page(&mut self) {
        self.viewport.next_page(self.projection.row_count());
        self.geometry_changed();
    }

    pub fn previous_page(&mut self) {
        self.viewport.previous_page(self.projection.row_count());
        self.geometry_changed();
    }

    pub fn set_edit_granularity_minutes(&mut self, minutes: u32) {
        self.interaction.set_granularity_minutes(minutes);
    }

    pub fn set_hard_bounds(&mut self, lower: Option<NaiveDate>, upper: Option<NaiveDate>) {
        self.viewport.set_hard_bounds(lower, upper);
    }

    /// Move the window to a scrollbar position in `0..=1` of the hard bounds.
    pub fn scroll_to(&mut self, fraction: f32) {
        self.viewport.scroll_to(fraction);
        self.projection.set_window(self.viewport.window());
        self.geometry_changed();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let before = self.viewport.screen_size();
        self.viewport.resize(width, height);
        if self.viewport.screen_size() != before {
            self.geometry_changed();
        }
    }

    pub fn set_palette(&mut self, palette: TimelinePalette) {
        self.palette = palette;
        self.redraw_pending = true;
    }

    pub fn on_pointer_down(&mut self, pos: Pos2) {
        self.dispatch(PointerPhase::Down, pos);
    }

    pub fn on_pointer_move(&mut self, pos: Pos2) {
        self.dispatch(PointerPhase::Move, pos);
    }

    pub fn on_pointer_up(&mut self, pos: Pos2) {
        self.dispatch(PointerPhase::Up, pos);
    }

    pub fn on_pointer_leave(&mut self) {
        let outcome = self.interaction.on_pointer_leave(&mut self.arena);
        self.apply(outcome);
    }

    /// Every global row with only the slots inside the view window.
    pub fn visible_rows(&mut self) -> &[Vec<TimeSlot>] {
        self.projection.visible_rows()
    }

    pub fn row(&mut self, global_row: usize) -> &[TimeSlot] {
        self.projection.row(global_row)
    }

    pub fn visible_row(&mut self, global_row: usize) -> &[TimeSlot] {
        self.projection.visible_row(global_row)
    }

    pub fn row_count(&self) -> usize {
        self.projection.row_count()
    }

    pub fn page_count(&self) -> usize {
        self.viewport.page_count(self.projection.row_count())
    }

    pub fn current_page(&self) -> usize {
        self.viewport.current_page()
    }

    pub fn groups(&self) -> &[Group] {
        self.projection.groups()
    }

    pub fn pointer_state(&self) -> PointerState {
        self.interaction.state()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.interaction.selection()
    }

    pub fn preview(&self) -> Option<&CreatePreview> {
        self.interaction.preview()
    }

    pub fn has_toolbox(&self) -> bool {
        self.interaction.toolbox().is_some()
    }

    pub fn viewport(&self) -> &TimelineViewport {
        &self.viewport
    }

    pub fn projection(&self) -> &RowProjection {
        &self.projection
    }

    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    pub fn collaborator_mut(&mut self) -> &mut C {
        &mut self.collaborator
    }

    /// Screen rectangle of a slot's box on the current page.
    pub fn shift_rect(&mut self, slot: &SlotId) -> Option<Rect> {
        self.ensure_scene();
        let node = self.arena.find_shift(slot)?;
        self.arena.global_rect(node)
    }

    /// Screen rectangle of the open toolbox.
    pub fn toolbox_rect(&self) -> Option<Rect> {
        self.interaction
            .toolbox()
            .and_then(|toolbox| self.arena.global_rect(toolbox))
    }

    /// Paint the timeline in screen coordinates relative to its top-left corner.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        self.ensure_scene();
        self.arena.draw_all(surface, &self.palette);
        self.draw_header(surface);

        if let Some(preview) = self.interaction.preview() {
            surface.dashed_rect(preview.rect, Stroke::new(1.5, self.palette.preview_stroke));
            surface.text(
                preview.rect.min + vec2(4.0, 2.0),
                &preview.label,
                self.palette.label_text,
            );
        }
    }

    /// Forward at most one redraw request to the roster for everything that
    /// changed since the last call. Returns whether a request was sent.
    pub fn flush_redraw(&mut self) -> bool {
        let geometry = self.viewport.take_redraw_request();
        if !(geometry || self.redraw_pending) {
            return false;
        }
        self.redraw_pending = false;
        self.collaborator.request_redraw();
        true
    }

    fn dispatch(&mut self, phase: PointerPhase, pos: Pos2) {
        self.ensure_scene();
        let ctx = PointerContext {
            arena: &mut self.arena,
            projection: &self.projection,
            viewport: &self.viewport,
        };
        let outcome = match phase {
            PointerPhase::Down => self.interaction.on_pointer_down(ctx, pos),
            PointerPhase::Move => self.interaction.on_pointer_move(ctx, pos),
            PointerPhase::Up => self.interaction.on_pointer_up(ctx, pos),
        };
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: InteractionOutcome) {
        if outcome.redraw {
            self.redraw_pending = true;
        }
        for command in outcome.commands {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: InteractionCommand) {
        match command {
            InteractionCommand::CreateSlot { group, start, end } => {
                match self.collaborator.create_time_slot(group, start, end) {
                    Ok(Some(slot)) => {
                        log::debug!("Roster confirmed new slot {}", slot.id);
                        self.add_shift(slot);
                    }
                    Ok(None) => {
                        log::debug!("New slot in group {} awaits roster confirmation", group)
                    }
                    Err(err) => log::warn!("Roster rejected new slot in group {}: {:#}", group, err),
                }
            }
            InteractionCommand::DeleteSlot(id) => match self.collaborator.delete_time_slot(id) {
                Ok(true) => {
                    self.remove_shift(&id);
                }
                Ok(false) => log::debug!("Deletion of slot {} awaits roster confirmation", id),
                Err(err) => log::warn!("Roster rejected deletion of slot {}: {:#}", id, err),
            },
        }
    }

    fn data_changed(&mut self) {
        self.interaction.cancel_gesture(&mut self.arena);
        if let Some(selection) = self.interaction.selection() {
            if self.projection.slot(&selection.slot).is_none() {
                self.interaction.forget_selection();
            }
        }
        self.clamp_page();
        self.geometry_changed();
    }

    fn geometry_changed(&mut self) {
        self.scene_dirty = true;
        self.redraw_pending = true;
    }

    fn clamp_page(&mut self) {
        self.viewport
            .set_page(self.viewport.current_page(), self.projection.row_count());
    }

    fn ensure_scene(&mut self) {
        if self.scene_dirty {
            self.rebuild_scene();
        }
    }

    /// One band per group on the current page, one box per visible slot.
    fn rebuild_scene(&mut self) {
        self.arena.clear();
        self.interaction.forget_scene();

        let total = self.projection.row_count();
        let page_rows = self.viewport.rows_on_page(self.viewport.current_page(), total);
        let (width, _) = self.viewport.screen_size();
        let row_height = self.viewport.row_height();
        let window = self.projection.window();
        let selected = self.interaction.selection().map(|selection| selection.slot);

        let bands: Vec<(String, std::ops::Range<usize>)> = self
            .projection
            .groups()
            .iter()
            .filter_map(|group| Some((group.title.clone(), self.projection.group_rows(&group.id)?)))
            .collect();

        for (index, (title, rows)) in bands.into_iter().enumerate() {
            if rows.end <= page_rows.start || rows.start >= page_rows.end {
                continue;
            }
            let top = self.viewport.row_top(rows.start);
            let band = self.arena.insert(Drawable::new(
                None,
                pos2(0.0, top),
                vec2(width, rows.len() as f32 * row_height),
                DrawableKind::Container(ContainerNode {
                    label: Some(title),
                    alternate: index % 2 == 1,
                    add_row_height: row_height,
                }),
            ));

            for global in rows.filter(|row| page_rows.contains(row)) {
                let row_top = self.viewport.row_top(global) - top;
                let slots = self.projection.visible_row(global).to_vec();
                for slot in slots {
                    let start = slot.start.max(window.start);
                    let end = slot.end.min(window.end);
                    let x = self.viewport.pixel_x(start);
                    let box_width = (self.viewport.pixel_x(end) - x).max(MIN_SHIFT_WIDTH);
                    let mut node =
                        ShiftNode::new(slot.id, slot.group, format_time_range(slot.start, slot.end));
                    node.selected = selected == Some(slot.id);
                    self.arena.insert(Drawable::new(
                        Some(band),
                        pos2(x, row_top + SHIFT_PADDING),
                        vec2(box_width, (row_height - 2.0 * SHIFT_PADDING).max(0.0)),
                        DrawableKind::Shift(node),
                    ));
                }
            }
        }

        log::debug!(
            "Rebuilt scene for page {} ({} node(s))",
            self.viewport.current_page(),
            self.arena.len()
        );
        self.scene_dirty = false;
    }

    fn draw_header(&self, surface: &mut dyn Surface) {
        let (width, height) = self.viewport.screen_size();
        let header = self.viewport.header_height();
        let grid = Stroke::new(1.0, self.palette.grid_line);

        surface.fill_rect(
            Rect::from_min_size(Pos2::ZERO, vec2(width, header)),
            self.palette.band_alt_bg,
        );
        let label_x = self.viewport.label_column_width();
        surface.line(pos2(label_x, 0.0), pos2(label_x, height), grid);

        let start = self.viewport.window_start();
        for day in 0..self.viewport.days_shown() {
            let day_start = start + Duration::days(i64::from(day));
            let x = self.viewport.pixel_x(day_start);
            surface.line(pos2(x, 0.0), pos2(x, header), grid);
            surface.text(
                pos2(x + 4.0, 4.0),
                &day_start.format("%a %d %b").to_string(),
                self.palette.label_text,
            );
        }
        surface.line(pos2(0.0, header), pos2(width, header), grid);
    }
}
