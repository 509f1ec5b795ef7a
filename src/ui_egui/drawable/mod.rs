//! Drawable composition tree.
//!
//! Every visual element of the timeline (group bands, shift boxes, the
//! contextual toolbox and the hover popup) is a [`Drawable`] stored in a
//! [`DrawableArena`]. Nodes are placed relative to their parent, which is
//! referenced by [`NodeId`]; global positions are computed by walking the
//! parent ids. Drawing and pointer handling dispatch on [`DrawableKind`].

mod surface;

pub use surface::{RecordingSurface, Surface, SurfaceOp};

use egui::{pos2, vec2, Pos2, Rect, Stroke, Vec2};

use crate::models::roster::{GroupId, SlotId};
use crate::ui_egui::palette::TimelinePalette;

/// Pointer travel (in pixels) below which a press and release count as a click.
pub const CLICK_SLOP: f32 = 3.0;
pub const TOOLBOX_BUTTON_SIZE: Vec2 = Vec2::new(64.0, 24.0);
const TOOLBOX_PADDING: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// How a node responded to a pointer press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseDownResult {
    /// Not handled; the press falls through to the next candidate.
    Ignore,
    /// The node takes over the whole gesture.
    Consumed,
    /// The node handled the click; floating UI should be dismissed.
    RemoveFocus,
}

/// Requests a node raises while handling pointer events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeAction {
    OpenToolbox { slot: SlotId, anchor: NodeId },
    DeleteSlot(SlotId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShiftNode {
    pub slot: SlotId,
    pub group: GroupId,
    pub label: String,
    pub selected: bool,
    pub hovered: bool,
    press: Option<Pos2>,
    moved: bool,
}

impl ShiftNode {
    pub fn new(slot: SlotId, group: GroupId, label: impl Into<String>) -> Self {
        Self {
            slot,
            group,
            label: label.into(),
            selected: false,
            hovered: false,
            press: None,
            moved: false,
        }
    }
}

/// A group band; its bottom `add_row_height` pixels are the reserved add row.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerNode {
    pub label: Option<String>,
    pub alternate: bool,
    pub add_row_height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolboxNode {
    pub slot: SlotId,
}

impl ToolboxNode {
    pub fn size() -> Vec2 {
        vec2(
            TOOLBOX_BUTTON_SIZE.x * 2.0 + TOOLBOX_PADDING * 3.0,
            TOOLBOX_BUTTON_SIZE.y + TOOLBOX_PADDING * 2.0,
        )
    }

    fn delete_button(rect: Rect) -> Rect {
        Rect::from_min_size(rect.min + vec2(TOOLBOX_PADDING, TOOLBOX_PADDING), TOOLBOX_BUTTON_SIZE)
    }

    fn close_button(rect: Rect) -> Rect {
        Self::delete_button(rect).translate(vec2(TOOLBOX_BUTTON_SIZE.x + TOOLBOX_PADDING, 0.0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopupNode {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawableKind {
    Shift(ShiftNode),
    Container(ContainerNode),
    Toolbox(ToolboxNode),
    Popup(PopupNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    pub parent: Option<NodeId>,
    /// Top-left corner relative to the parent
    pub local: Pos2,
    pub size: Vec2,
    pub kind: DrawableKind,
}

impl Drawable {
    pub fn new(parent: Option<NodeId>, local: Pos2, size: Vec2, kind: DrawableKind) -> Self {
        Self {
            parent,
            local,
            size,
            kind,
        }
    }

    pub fn local_rect(&self) -> Rect {
        Rect::from_min_size(self.local, self.size)
    }
}

/// Arena owning the drawables; parents are referenced by id, never owned.
#[derive(Clone, Debug, Default)]
pub struct DrawableArena {
    nodes: Vec<Option<Drawable>>,
}

impl DrawableArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Drawable) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Drawable> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Drawable> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a node and all of its descendants.
    pub fn remove(&mut self, id: NodeId) -> Option<Drawable> {
        let removed = self.nodes.get_mut(id.0)?.take()?;
        let children: Vec<NodeId> = self
            .ids()
            .filter(|child| self.get(*child).and_then(|node| node.parent) == Some(id))
            .collect();
        for child in children {
            self.remove(child);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live node ids in insertion order (parents before their children).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_some())
            .map(|(index, _)| NodeId(index))
    }

    /// Sum of the local positions along the parent chain.
    pub fn global_position(&self, id: NodeId) -> Pos2 {
        let mut position = Vec2::ZERO;
        let mut current = Some(id);
        let mut hops = 0;
        while let Some(node) = current.and_then(|node_id| self.get(node_id)) {
            position += node.local.to_vec2();
            current = node.parent;
            hops += 1;
            if hops > self.nodes.len() {
                log::warn!("Drawable parent chain of {:?} contains a cycle", id);
                break;
            }
        }
        position.to_pos2()
    }

    /// Global position of the node's parent, or the origin for roots.
    pub fn parent_origin(&self, id: NodeId) -> Vec2 {
        self.get(id)
            .and_then(|node| node.parent)
            .map(|parent| self.global_position(parent).to_vec2())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn global_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        Some(Rect::from_min_size(self.global_position(id), node.size))
    }

    pub fn hit_test(&self, id: NodeId, pos: Pos2) -> bool {
        self.global_rect(id).is_some_and(|rect| rect.contains(pos))
    }

    pub fn find_shift(&self, slot: &SlotId) -> Option<NodeId> {
        self.ids().find(|id| {
            matches!(self.get(*id).map(|n| &n.kind), Some(DrawableKind::Shift(shift)) if shift.slot == *slot)
        })
    }

    /// Topmost shift box under `pos`.
    pub fn shift_at(&self, pos: Pos2) -> Option<NodeId> {
        let shifts: Vec<NodeId> = self
            .ids()
            .filter(|id| matches!(self.get(*id).map(|n| &n.kind), Some(DrawableKind::Shift(_))))
            .collect();
        shifts.into_iter().rev().find(|id| self.hit_test(*id, pos))
    }

    /// Draw one node inside its parent's coordinate space.
    pub fn draw(&self, id: NodeId, surface: &mut dyn Surface, palette: &TimelinePalette) {
        let Some(node) = self.get(id) else {
            return;
        };
        surface.save();
        surface.translate(self.parent_origin(id));
        paint(node, surface, palette);
        surface.restore();
    }

    /// Draw every node, parents before children.
    pub fn draw_all(&self, surface: &mut dyn Surface, palette: &TimelinePalette) {
        for id in self.ids() {
            self.draw(id, surface, palette);
        }
    }

    pub fn on_mouse_down(
        &mut self,
        id: NodeId,
        pos: Pos2,
        actions: &mut Vec<NodeAction>,
    ) -> MouseDownResult {
        let local = pos - self.parent_origin(id);
        let Some(node) = self.get_mut(id) else {
            return MouseDownResult::Ignore;
        };
        let rect = node.local_rect();
        if !rect.contains(local) {
            return MouseDownResult::Ignore;
        }
        match &mut node.kind {
            DrawableKind::Shift(shift) => {
                shift.press = Some(pos);
                shift.moved = false;
                MouseDownResult::Consumed
            }
            DrawableKind::Toolbox(toolbox) => {
                if ToolboxNode::delete_button(rect).contains(local) {
                    actions.push(NodeAction::DeleteSlot(toolbox.slot));
                    MouseDownResult::RemoveFocus
                } else if ToolboxNode::close_button(rect).contains(local) {
                    MouseDownResult::RemoveFocus
                } else {
                    MouseDownResult::Consumed
                }
            }
            DrawableKind::Container(_) | DrawableKind::Popup(_) => MouseDownResult::Ignore,
        }
    }

    /// Drag handler; `true` when the node consumed the move.
    pub fn on_mouse_move(&mut self, id: NodeId, pos: Pos2) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        if let DrawableKind::Shift(shift) = &mut node.kind {
            if let Some(press) = shift.press {
                if press.distance(pos) > CLICK_SLOP {
                    shift.moved = true;
                }
            }
        }
        false
    }

    /// Release handler; `true` when the node consumed the release.
    pub fn on_mouse_up(&mut self, id: NodeId, pos: Pos2, actions: &mut Vec<NodeAction>) -> bool {
        let inside = self.hit_test(id, pos);
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        match &mut node.kind {
            DrawableKind::Shift(shift) => {
                let clicked = shift.press.take().is_some() && !shift.moved && inside;
                shift.moved = false;
                if clicked {
                    actions.push(NodeAction::OpenToolbox {
                        slot: shift.slot,
                        anchor: id,
                    });
                }
                clicked
            }
            _ => false,
        }
    }

    /// Forget a press without treating it as a release.
    pub fn cancel_press(&mut self, id: NodeId) {
        if let Some(DrawableKind::Shift(shift)) = self.get_mut(id).map(|node| &mut node.kind) {
            shift.press = None;
            shift.moved = false;
        }
    }

    /// Mark exactly one shift box (or none) as selected.
    pub fn select_shift(&mut self, slot: Option<SlotId>) {
        for node in self.nodes.iter_mut().flatten() {
            if let DrawableKind::Shift(shift) = &mut node.kind {
                shift.selected = Some(shift.slot) == slot;
            }
        }
    }

    pub fn on_mouse_enter(&mut self, id: NodeId) -> bool {
        self.set_hovered(id, true)
    }

    pub fn on_mouse_exit(&mut self, id: NodeId) -> bool {
        self.set_hovered(id, false)
    }

    fn set_hovered(&mut self, id: NodeId, hovered: bool) -> bool {
        match self.get_mut(id).map(|node| &mut node.kind) {
            Some(DrawableKind::Shift(shift)) => {
                shift.hovered = hovered;
                true
            }
            Some(DrawableKind::Toolbox(_)) => true,
            _ => false,
        }
    }
}

fn paint(node: &Drawable, surface: &mut dyn Surface, palette: &TimelinePalette) {
    let rect = node.local_rect();
    match &node.kind {
        DrawableKind::Container(container) => {
            let fill = if container.alternate {
                palette.band_alt_bg
            } else {
                palette.band_bg
            };
            surface.fill_rect(rect, fill);
            if container.add_row_height > 0.0 {
                let add_row = Rect::from_min_max(
                    pos2(rect.min.x, rect.max.y - container.add_row_height),
                    rect.max,
                );
                surface.fill_rect(add_row, palette.add_row_bg);
            }
            surface.line(
                pos2(rect.min.x, rect.max.y),
                rect.max,
                Stroke::new(1.0, palette.grid_line),
            );
            if let Some(label) = &container.label {
                surface.text(rect.min + vec2(6.0, 4.0), label, palette.label_text);
            }
        }
        DrawableKind::Shift(shift) => {
            surface.fill_rect(rect, palette.shift_fill);
            let border = if shift.selected {
                Stroke::new(2.0, palette.selected_border)
            } else if shift.hovered {
                Stroke::new(1.5, palette.hover_border)
            } else {
                Stroke::new(1.0, palette.shift_border)
            };
            surface.stroke_rect(rect, border);
            surface.text(rect.min + vec2(4.0, 2.0), &shift.label, palette.shift_text);
        }
        DrawableKind::Toolbox(_) => {
            surface.fill_rect(rect, palette.toolbox_bg);
            let delete = ToolboxNode::delete_button(rect);
            let close = ToolboxNode::close_button(rect);
            surface.fill_rect(delete, palette.delete_button);
            surface.fill_rect(close, palette.toolbox_button);
            surface.text(delete.min + vec2(6.0, 4.0), "Delete", palette.shift_text);
            surface.text(close.min + vec2(6.0, 4.0), "Close", palette.shift_text);
        }
        DrawableKind::Popup(popup) => {
            surface.fill_rect(rect, palette.popup_bg);
            surface.stroke_rect(rect, Stroke::new(1.0, palette.grid_line));
            surface.text(rect.min + vec2(4.0, 2.0), &popup.text, palette.popup_text);
        }
    }
}
