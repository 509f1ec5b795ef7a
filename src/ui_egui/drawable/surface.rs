//! Drawing target for timeline drawables.
//!
//! Coordinates are relative to the current translation. `save`/`restore`
//! bracket every node's paint so translations never leak to siblings.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn dashed_rect(&mut self, rect: Rect, stroke: Stroke);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn text(&mut self, pos: Pos2, text: &str, color: Color32);
}

/// A recorded drawing command with its translation already applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Fill(Rect, Color32),
    Stroke(Rect, Stroke),
    Dashed(Rect, Stroke),
    Line(Pos2, Pos2, Stroke),
    Text(Pos2, String),
}

/// Surface that records commands in absolute coordinates instead of painting.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    offset: Vec2,
    saved: Vec<Vec2>,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translation stack depth; zero once every `save` has been restored.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(SurfaceOp::Fill(rect.translate(self.offset), color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(SurfaceOp::Stroke(rect.translate(self.offset), stroke));
    }

    fn dashed_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(SurfaceOp::Dashed(rect.translate(self.offset), stroke));
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.ops
            .push(SurfaceOp::Line(from + self.offset, to + self.offset, stroke));
    }

    fn text(&mut self, pos: Pos2, text: &str, _color: Color32) {
        self.ops.push(SurfaceOp::Text(pos + self.offset, text.to_string()));
    }
}
