//! [`Surface`] implementation drawing through an `egui::Painter`.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use super::drawable::Surface;

const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

pub struct EguiSurface<'a> {
    painter: &'a Painter,
    offset: Vec2,
    saved: Vec<Vec2>,
    font: FontId,
}

impl<'a> EguiSurface<'a> {
    /// `origin` is the screen position of the timeline's top-left corner.
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            offset: origin.to_vec2(),
            saved: Vec::new(),
            font: FontId::proportional(12.0),
        }
    }
}

impl Surface for EguiSurface<'_> {
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
        self.painter
            .rect_filled(rect.translate(self.offset), Rounding::same(3.0), color);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.painter
            .rect_stroke(rect.translate(self.offset), Rounding::same(3.0), stroke);
    }

    fn dashed_rect(&mut self, rect: Rect, stroke: Stroke) {
        let rect = rect.translate(self.offset);
        let outline = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        self.painter
            .extend(Shape::dashed_line(&outline, stroke, DASH_LENGTH, GAP_LENGTH));
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.offset, to + self.offset], stroke);
    }

    fn text(&mut self, pos: Pos2, text: &str, color: Color32) {
        self.painter.text(
            pos + self.offset,
            Align2::LEFT_TOP,
            text,
            self.font.clone(),
            color,
        );
    }
}
