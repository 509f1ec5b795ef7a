// Pointer interaction for the shift timeline
//
// Turns raw pointer events into semantic actions:
// - Press on a shift box: select it and start dragging it
// - Click on a shift box: open its toolbox (delete / close)
// - Press in a group's reserved bottom row and drag: create a new slot
// - Hover over a shift box: show a popup with its group and times

use std::collections::HashMap;

use chrono::NaiveDateTime;
use egui::{pos2, Pos2, Rect, Vec2};

use crate::models::roster::{GroupId, SlotId};
use crate::services::projection::RowProjection;
use crate::services::viewport::TimelineViewport;
use crate::ui_egui::drawable::{
    Drawable, DrawableArena, DrawableKind, MouseDownResult, NodeAction, NodeId, PopupNode,
    ToolboxNode,
};
use crate::utils::date::{format_time_range, round_to_granularity};

const POPUP_SIZE: Vec2 = Vec2::new(180.0, 20.0);
const OVERLAY_GAP: f32 = 2.0;

/// The single active pointer state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerState {
    Idle,
    HoveringSlot { slot: SlotId, node: NodeId },
    Dragging { slot: SlotId, node: NodeId },
    /// Drag-to-create; the group is fixed when the press happens.
    CreatingNewSlot {
        group: GroupId,
        row: usize,
        start_x: f32,
        current_x: f32,
    },
}

/// The slot picked by the last press, with the group/row it is targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub slot: SlotId,
    pub group: GroupId,
    pub row: usize,
}

/// Live preview of a slot being drag-created.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatePreview {
    pub group: GroupId,
    pub row: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub rect: Rect,
    pub label: String,
}

/// Requests for the external roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionCommand {
    CreateSlot {
        group: GroupId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    DeleteSlot(SlotId),
}

/// What handling one pointer event produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub commands: Vec<InteractionCommand>,
    pub redraw: bool,
}

impl InteractionOutcome {
    fn redraw() -> Self {
        Self {
            commands: Vec::new(),
            redraw: true,
        }
    }
}

/// Read/write access to the scene a pointer event is resolved against.
pub struct PointerContext<'a> {
    pub arena: &'a mut DrawableArena,
    pub projection: &'a RowProjection,
    pub viewport: &'a TimelineViewport,
}

#[derive(Debug)]
pub struct MouseInteraction {
    state: PointerState,
    granularity_minutes: u32,
    selection: Option<Selection>,
    /// Local row per group where the next slot would be inserted
    insertion_cursor: HashMap<GroupId, usize>,
    toolbox: Option<NodeId>,
    popup: Option<NodeId>,
    preview: Option<CreatePreview>,
}

impl MouseInteraction {
    pub fn new(granularity_minutes: u32) -> Self {
        Self {
            state: PointerState::Idle,
            granularity_minutes: granularity_minutes.max(1),
            selection: None,
            insertion_cursor: HashMap::new(),
            toolbox: None,
            popup: None,
            preview: None,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn preview(&self) -> Option<&CreatePreview> {
        self.preview.as_ref()
    }

    pub fn toolbox(&self) -> Option<NodeId> {
        self.toolbox
    }

    pub fn popup(&self) -> Option<NodeId> {
        self.popup
    }

    pub fn insertion_cursor(&self, group: &GroupId) -> Option<usize> {
        self.insertion_cursor.get(group).copied()
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    pub fn set_granularity_minutes(&mut self, minutes: u32) {
        self.granularity_minutes = minutes.max(1);
    }

    pub fn on_pointer_down(&mut self, ctx: PointerContext<'_>, pos: Pos2) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        let mut actions = Vec::new();

        if let PointerState::HoveringSlot { node, .. } = self.state {
            ctx.arena.on_mouse_exit(node);
            self.state = PointerState::Idle;
            outcome.redraw = true;
        }

        if let Some(toolbox) = self.toolbox {
            match ctx.arena.on_mouse_down(toolbox, pos, &mut actions) {
                MouseDownResult::RemoveFocus => {
                    self.close_toolbox(ctx.arena);
                    self.clear_selection(ctx.arena);
                    self.state = PointerState::Idle;
                    outcome.commands.extend(actions.into_iter().filter_map(|action| {
                        match action {
                            NodeAction::DeleteSlot(slot) => Some(InteractionCommand::DeleteSlot(slot)),
                            NodeAction::OpenToolbox { .. } => None,
                        }
                    }));
                    outcome.redraw = true;
                    return outcome;
                }
                MouseDownResult::Consumed => return outcome,
                MouseDownResult::Ignore => {
                    self.close_toolbox(ctx.arena);
                    outcome.redraw = true;
                }
            }
        }

        if self.remove_popup(ctx.arena) {
            outcome.redraw = true;
        }

        if let Some(node) = ctx.arena.shift_at(pos) {
            if ctx.arena.on_mouse_down(node, pos, &mut actions) == MouseDownResult::Consumed {
                if let Some(DrawableKind::Shift(shift)) = ctx.arena.get(node).map(|n| &n.kind) {
                    let slot = shift.slot;
                    let group = shift.group;
                    let row = ctx
                        .projection
                        .row_of_slot(&slot)
                        .or_else(|| ctx.viewport.global_row_at_y(pos.y))
                        .unwrap_or(0);
                    log::debug!("Pointer down on slot {}; dragging", slot);
                    self.selection = Some(Selection { slot, group, row });
                    ctx.arena.select_shift(Some(slot));
                    self.state = PointerState::Dragging { slot, node };
                    outcome.redraw = true;
                    return outcome;
                }
            }
        }

        if self.selection.is_some() {
            self.clear_selection(ctx.arena);
            outcome.redraw = true;
        }

        if pos.x < ctx.viewport.label_column_width() {
            self.state = PointerState::Idle;
            return outcome;
        }
        let Some(row) = ctx.viewport.global_row_at_y(pos.y) else {
            self.state = PointerState::Idle;
            return outcome;
        };
        let Some((group, local_row)) = ctx.projection.locate_row(row) else {
            self.state = PointerState::Idle;
            return outcome;
        };
        if ctx.projection.add_row(&group.id) != Some(row) {
            self.state = PointerState::Idle;
            return outcome;
        }

        log::debug!("Pointer down in add row of group {}; creating", group.id);
        self.insertion_cursor.insert(group.id, local_row);
        self.state = PointerState::CreatingNewSlot {
            group: group.id,
            row,
            start_x: pos.x,
            current_x: pos.x,
        };
        self.preview = self.build_preview(ctx.viewport);
        outcome.redraw = true;
        outcome
    }

    pub fn on_pointer_move(&mut self, ctx: PointerContext<'_>, pos: Pos2) -> InteractionOutcome {
        match self.state {
            PointerState::CreatingNewSlot {
                group,
                row,
                start_x,
                ..
            } => {
                self.state = PointerState::CreatingNewSlot {
                    group,
                    row,
                    start_x,
                    current_x: pos.x,
                };
                let preview = self.build_preview(ctx.viewport);
                let changed = preview != self.preview;
                self.preview = preview;
                InteractionOutcome {
                    commands: Vec::new(),
                    redraw: changed,
                }
            }
            PointerState::Dragging { node, .. } => {
                if ctx.arena.on_mouse_move(node, pos) {
                    return InteractionOutcome::redraw();
                }
                self.retarget_selection(&ctx, pos)
            }
            PointerState::Idle | PointerState::HoveringSlot { .. } => self.update_hover(ctx, pos),
        }
    }

    pub fn on_pointer_up(&mut self, ctx: PointerContext<'_>, pos: Pos2) -> InteractionOutcome {
        let state = std::mem::replace(&mut self.state, PointerState::Idle);
        match state {
            PointerState::CreatingNewSlot {
                group,
                start_x,
                ..
            } => {
                self.preview = None;
                let mut start = self.snapped_time(ctx.viewport, start_x);
                let mut end = self.snapped_time(ctx.viewport, pos.x);
                if start == end {
                    log::debug!("Discarding zero-length create gesture in group {}", group);
                    return InteractionOutcome::redraw();
                }
                if end < start {
                    std::mem::swap(&mut start, &mut end);
                }
                InteractionOutcome {
                    commands: vec![InteractionCommand::CreateSlot { group, start, end }],
                    redraw: true,
                }
            }
            PointerState::Dragging { slot, node } => {
                let mut actions = Vec::new();
                if ctx.arena.on_mouse_up(node, pos, &mut actions) {
                    for action in actions {
                        if let NodeAction::OpenToolbox { slot, anchor } = action {
                            self.open_toolbox(ctx.arena, slot, anchor);
                        }
                    }
                    return InteractionOutcome::redraw();
                }
                log::debug!("Drag of slot {} released", slot);
                self.clear_selection(ctx.arena);
                InteractionOutcome::redraw()
            }
            PointerState::Idle | PointerState::HoveringSlot { .. } => {
                self.state = state;
                InteractionOutcome::default()
            }
        }
    }

    /// Abort the current gesture (pointer left the timeline).
    pub fn on_pointer_leave(&mut self, arena: &mut DrawableArena) -> InteractionOutcome {
        let had_gesture = self.state != PointerState::Idle || self.popup.is_some();
        self.cancel_gesture(arena);
        InteractionOutcome {
            commands: Vec::new(),
            redraw: had_gesture,
        }
    }

    /// Drop any in-flight gesture and the hover popup. Selection and toolbox survive.
    pub fn cancel_gesture(&mut self, arena: &mut DrawableArena) {
        match self.state {
            PointerState::Dragging { node, .. } => {
                arena.cancel_press(node);
                self.clear_selection(arena);
            }
            PointerState::HoveringSlot { node, .. } => {
                arena.on_mouse_exit(node);
            }
            PointerState::CreatingNewSlot { .. } | PointerState::Idle => {}
        }
        self.remove_popup(arena);
        self.preview = None;
        self.state = PointerState::Idle;
    }

    /// The scene was rebuilt; node ids held here are stale.
    pub fn forget_scene(&mut self) {
        if self.state != PointerState::Idle {
            log::debug!("Scene rebuilt mid-gesture; returning to idle");
        }
        self.state = PointerState::Idle;
        if self.toolbox.take().is_some() {
            self.selection = None;
        }
        self.popup = None;
        self.preview = None;
    }

    /// Drop the selection, e.g. after the selected slot was removed.
    pub fn forget_selection(&mut self) {
        self.selection = None;
    }

    fn snapped_time(&self, viewport: &TimelineViewport, x: f32) -> NaiveDateTime {
        round_to_granularity(viewport.time_at_x(x), self.granularity_minutes)
    }

    fn build_preview(&self, viewport: &TimelineViewport) -> Option<CreatePreview> {
        let PointerState::CreatingNewSlot {
            group,
            row,
            start_x,
            current_x,
        } = self.state
        else {
            return None;
        };
        let start = self.snapped_time(viewport, start_x.min(current_x));
        let end = self.snapped_time(viewport, start_x.max(current_x));
        let top = viewport.row_top(row);
        let rect = Rect::from_min_max(
            pos2(viewport.pixel_x(start), top),
            pos2(viewport.pixel_x(end), top + viewport.row_height()),
        );
        Some(CreatePreview {
            group,
            row,
            start,
            end,
            rect,
            label: format_time_range(start, end),
        })
    }

    fn retarget_selection(&mut self, ctx: &PointerContext<'_>, pos: Pos2) -> InteractionOutcome {
        let Some(selection) = self.selection else {
            return InteractionOutcome::default();
        };
        let Some(row) = ctx.viewport.global_row_at_y(pos.y) else {
            return InteractionOutcome::default();
        };
        let Some((group, _)) = ctx.projection.locate_row(row) else {
            return InteractionOutcome::default();
        };
        if selection.row == row && selection.group == group.id {
            return InteractionOutcome::default();
        }
        self.selection = Some(Selection {
            row,
            group: group.id,
            ..selection
        });
        InteractionOutcome::redraw()
    }

    fn update_hover(&mut self, ctx: PointerContext<'_>, pos: Pos2) -> InteractionOutcome {
        let hit = ctx.arena.shift_at(pos);
        let current = match self.state {
            PointerState::HoveringSlot { node, .. } => Some(node),
            _ => None,
        };
        if hit == current {
            return InteractionOutcome::default();
        }

        if let Some(old) = current {
            ctx.arena.on_mouse_exit(old);
        }
        self.remove_popup(ctx.arena);
        self.state = PointerState::Idle;

        if let Some(node) = hit {
            ctx.arena.on_mouse_enter(node);
            if let Some(DrawableKind::Shift(shift)) = ctx.arena.get(node).map(|n| &n.kind) {
                let slot = shift.slot;
                let text = popup_text(ctx.projection, &slot);
                self.state = PointerState::HoveringSlot { slot, node };
                if self.toolbox.is_none() {
                    self.open_popup(ctx.arena, node, text);
                }
            }
        }
        InteractionOutcome::redraw()
    }

    fn open_toolbox(&mut self, arena: &mut DrawableArena, slot: SlotId, anchor: NodeId) {
        self.close_toolbox(arena);
        self.remove_popup(arena);
        let below = arena.get(anchor).map(|node| node.size.y).unwrap_or(0.0) + OVERLAY_GAP;
        let toolbox = arena.insert(Drawable::new(
            Some(anchor),
            pos2(0.0, below),
            ToolboxNode::size(),
            DrawableKind::Toolbox(ToolboxNode { slot }),
        ));
        log::debug!("Opened toolbox for slot {}", slot);
        self.toolbox = Some(toolbox);
    }

    fn close_toolbox(&mut self, arena: &mut DrawableArena) -> bool {
        match self.toolbox.take() {
            Some(toolbox) => arena.remove(toolbox).is_some(),
            None => false,
        }
    }

    fn open_popup(&mut self, arena: &mut DrawableArena, anchor: NodeId, text: String) {
        let below = arena.get(anchor).map(|node| node.size.y).unwrap_or(0.0) + OVERLAY_GAP;
        let popup = arena.insert(Drawable::new(
            Some(anchor),
            pos2(0.0, below),
            POPUP_SIZE,
            DrawableKind::Popup(PopupNode { text }),
        ));
        self.popup = Some(popup);
    }

    fn remove_popup(&mut self, arena: &mut DrawableArena) -> bool {
        match self.popup.take() {
            Some(popup) => arena.remove(popup).is_some(),
            None => false,
        }
    }

    fn clear_selection(&mut self, arena: &mut DrawableArena) {
        self.selection = None;
        arena.select_shift(None);
    }
}

fn popup_text(projection: &RowProjection, slot: &SlotId) -> String {
    let Some(slot) = projection.slot(slot) else {
        return String::new();
    };
    let times = format_time_range(slot.start, slot.end);
    match projection.group(&slot.group) {
        Some(group) => format!("{} {}", group.title, times),
        None => times,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roster::{Group, TimeSlot, ViewWindow};
    use crate::models::settings::TimelineSettings;
    use crate::ui_egui::drawable::ShiftNode;
    use crate::utils::date::start_of_day;
    use chrono::NaiveDate;
    use egui::vec2;

    struct Fixture {
        arena: DrawableArena,
        projection: RowProjection,
        viewport: TimelineViewport,
        group: Group,
        slot: TimeSlot,
        shift_node: NodeId,
    }

    impl Fixture {
        fn ctx(&mut self) -> PointerContext<'_> {
            PointerContext {
                arena: &mut self.arena,
                projection: &self.projection,
                viewport: &self.viewport,
            }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    /// One group with one 09:00-17:00 slot; 1 px per minute, 50 px rows
    /// below a 40 px header and a 120 px label column.
    fn fixture() -> Fixture {
        let settings = TimelineSettings {
            days_shown: 1,
            rows_per_page: 9,
            ..Default::default()
        };
        let mut viewport = TimelineViewport::new(&settings, start_of_day(day()));
        viewport.resize(1560.0, 540.0);

        let group = Group::new("Kitchen").unwrap();
        let slot = TimeSlot::new(group.id, at(9, 0), at(17, 0)).unwrap();
        let mut projection = RowProjection::new(ViewWindow::from_days(day(), 1));
        projection.set_groups(vec![group.clone()]);
        projection.set_slots(vec![slot.clone()]);

        let mut arena = DrawableArena::new();
        let x = viewport.pixel_x(slot.start);
        let width = viewport.pixel_x(slot.end) - x;
        let shift_node = arena.insert(Drawable::new(
            None,
            pos2(x, viewport.row_top(0)),
            vec2(width, viewport.row_height()),
            DrawableKind::Shift(ShiftNode::new(slot.id, group.id, "09:00-17:00")),
        ));

        Fixture {
            arena,
            projection,
            viewport,
            group,
            slot,
            shift_node,
        }
    }

    fn add_row_y() -> f32 {
        // Row 1 is the add row: 90..140
        110.0
    }

    fn x_at(h: u32, m: u32) -> f32 {
        120.0 + (h * 60 + m) as f32
    }

    #[test]
    fn test_drag_create_snaps_to_granularity() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(9, 7), add_row_y()));
        assert!(matches!(
            interaction.state(),
            PointerState::CreatingNewSlot { .. }
        ));
        assert_eq!(interaction.insertion_cursor(&f.group.id), Some(1));

        interaction.on_pointer_move(f.ctx(), pos2(x_at(9, 52), add_row_y()));
        let preview = interaction.preview().unwrap();
        assert_eq!(preview.label, "09:00-10:00");
        assert_eq!(preview.rect.min.x, x_at(9, 0));

        let outcome = interaction.on_pointer_up(f.ctx(), pos2(x_at(9, 52), add_row_y()));
        assert_eq!(
            outcome.commands,
            vec![InteractionCommand::CreateSlot {
                group: f.group.id,
                start: at(9, 0),
                end: at(10, 0),
            }]
        );
        assert_eq!(interaction.state(), PointerState::Idle);
        assert!(interaction.preview().is_none());
    }

    #[test]
    fn test_reverse_drag_creates_ordered_slot() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(12, 0), add_row_y()));
        let outcome = interaction.on_pointer_up(f.ctx(), pos2(x_at(10, 0), add_row_y()));

        assert_eq!(
            outcome.commands,
            vec![InteractionCommand::CreateSlot {
                group: f.group.id,
                start: at(10, 0),
                end: at(12, 0),
            }]
        );
    }

    #[test]
    fn test_click_in_add_row_creates_nothing() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(9, 7), add_row_y()));
        let outcome = interaction.on_pointer_up(f.ctx(), pos2(x_at(9, 12), add_row_y()));

        assert!(outcome.commands.is_empty());
        assert_eq!(interaction.state(), PointerState::Idle);
    }

    #[test]
    fn test_press_outside_add_row_does_nothing() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        // Row 0 but before the slot starts
        interaction.on_pointer_down(f.ctx(), pos2(x_at(2, 0), 60.0));
        assert_eq!(interaction.state(), PointerState::Idle);
        // Label column
        interaction.on_pointer_down(f.ctx(), pos2(50.0, add_row_y()));
        assert_eq!(interaction.state(), PointerState::Idle);
    }

    #[test]
    fn test_create_keeps_original_group_when_released_elsewhere() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(9, 0), add_row_y()));
        interaction.on_pointer_move(f.ctx(), pos2(x_at(11, 0), 400.0));
        let outcome = interaction.on_pointer_up(f.ctx(), pos2(x_at(11, 0), 400.0));

        assert!(matches!(
            outcome.commands.as_slice(),
            [InteractionCommand::CreateSlot { group, .. }] if *group == f.group.id
        ));
    }

    #[test]
    fn test_press_on_shift_selects_and_drags() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(10, 0), 60.0));

        assert_eq!(
            interaction.state(),
            PointerState::Dragging {
                slot: f.slot.id,
                node: f.shift_node
            }
        );
        assert_eq!(
            interaction.selection(),
            Some(Selection {
                slot: f.slot.id,
                group: f.group.id,
                row: 0
            })
        );
    }

    #[test]
    fn test_click_on_shift_opens_toolbox_then_delete() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);
        let on_shift = pos2(x_at(10, 0), 60.0);

        interaction.on_pointer_down(f.ctx(), on_shift);
        let up = interaction.on_pointer_up(f.ctx(), on_shift);
        assert!(up.commands.is_empty());
        let toolbox = interaction.toolbox().expect("toolbox should open");
        assert!(interaction.selection().is_some());

        // Delete button sits just inside the toolbox's top-left corner
        let toolbox_rect = f.arena.global_rect(toolbox).unwrap();
        let down = interaction.on_pointer_down(f.ctx(), toolbox_rect.min + vec2(8.0, 8.0));

        assert_eq!(down.commands, vec![InteractionCommand::DeleteSlot(f.slot.id)]);
        assert!(interaction.toolbox().is_none());
        assert!(!f.arena.contains(toolbox));
        assert!(interaction.selection().is_none());
    }

    #[test]
    fn test_drag_release_clears_selection() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(10, 0), 60.0));
        interaction.on_pointer_move(f.ctx(), pos2(x_at(11, 0), 60.0));
        interaction.on_pointer_up(f.ctx(), pos2(x_at(11, 0), 60.0));

        assert!(interaction.selection().is_none());
        assert!(interaction.toolbox().is_none());
        assert_eq!(interaction.state(), PointerState::Idle);
    }

    #[test]
    fn test_hover_shows_and_hides_popup() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_move(f.ctx(), pos2(x_at(10, 0), 60.0));
        let popup = interaction.popup().expect("popup should show");
        match &f.arena.get(popup).unwrap().kind {
            DrawableKind::Popup(node) => assert_eq!(node.text, "Kitchen 09:00-17:00"),
            other => panic!("unexpected node {:?}", other),
        }

        interaction.on_pointer_move(f.ctx(), pos2(x_at(20, 0), 60.0));
        assert!(interaction.popup().is_none());
        assert!(!f.arena.contains(popup));
        assert_eq!(interaction.state(), PointerState::Idle);
    }

    #[test]
    fn test_pointer_leave_cancels_create() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);

        interaction.on_pointer_down(f.ctx(), pos2(x_at(9, 0), add_row_y()));
        interaction.on_pointer_leave(&mut f.arena);
        let outcome = interaction.on_pointer_up(f.ctx(), pos2(x_at(12, 0), add_row_y()));

        assert!(outcome.commands.is_empty());
        assert!(interaction.preview().is_none());
    }

    fn is_hovered(arena: &DrawableArena, node: NodeId) -> bool {
        match &arena.get(node).unwrap().kind {
            DrawableKind::Shift(shift) => shift.hovered,
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_press_after_hover_clears_highlight() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);
        let on_shift = pos2(x_at(10, 0), 60.0);

        interaction.on_pointer_move(f.ctx(), on_shift);
        assert!(is_hovered(&f.arena, f.shift_node));

        interaction.on_pointer_down(f.ctx(), on_shift);
        interaction.on_pointer_move(f.ctx(), on_shift + vec2(50.0, 0.0));
        interaction.on_pointer_up(f.ctx(), on_shift + vec2(50.0, 0.0));
        interaction.on_pointer_move(f.ctx(), pos2(x_at(21, 40), 60.0));

        assert!(!is_hovered(&f.arena, f.shift_node));
        assert_eq!(interaction.state(), PointerState::Idle);
    }

    #[test]
    fn test_pointer_leave_cancels_shift_drag() {
        let mut f = fixture();
        let mut interaction = MouseInteraction::new(30);
        let on_shift = pos2(x_at(10, 0), 60.0);

        interaction.on_pointer_down(f.ctx(), on_shift);
        let leave = interaction.on_pointer_leave(&mut f.arena);
        assert!(leave.redraw);
        assert_eq!(interaction.state(), PointerState::Idle);
        assert!(interaction.selection().is_none());

        let up = interaction.on_pointer_up(f.ctx(), on_shift);
        assert!(up.commands.is_empty());
        assert!(interaction.toolbox().is_none());
    }
}
