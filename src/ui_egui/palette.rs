use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Colours used by the timeline drawables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelinePalette {
    pub band_bg: Color32,
    pub band_alt_bg: Color32,
    pub add_row_bg: Color32,
    pub grid_line: Color32,
    pub label_text: Color32,
    pub shift_fill: Color32,
    pub shift_border: Color32,
    pub shift_text: Color32,
    pub hover_border: Color32,
    pub selected_border: Color32,
    pub preview_stroke: Color32,
    pub toolbox_bg: Color32,
    pub toolbox_button: Color32,
    pub delete_button: Color32,
    pub popup_bg: Color32,
    pub popup_text: Color32,
}

impl Default for TimelinePalette {
    fn default() -> Self {
        let accent = Color32::from_rgb(100, 150, 200);
        Self {
            band_bg: Color32::from_rgb(248, 248, 250),
            band_alt_bg: Color32::from_rgb(238, 240, 244),
            add_row_bg: with_alpha(accent, 24),
            grid_line: Color32::from_rgb(210, 210, 215),
            label_text: Color32::from_rgb(40, 40, 40),
            shift_fill: accent,
            shift_border: Color32::from_rgb(70, 110, 160),
            shift_text: Color32::WHITE,
            hover_border: with_alpha(Color32::WHITE, 200),
            selected_border: Color32::from_rgb(255, 170, 0),
            preview_stroke: Color32::from_rgb(60, 60, 60),
            toolbox_bg: Color32::from_rgb(50, 50, 55),
            toolbox_button: Color32::from_rgb(90, 90, 100),
            delete_button: Color32::from_rgb(200, 70, 70),
            popup_bg: Color32::from_rgb(255, 255, 225),
            popup_text: Color32::BLACK,
        }
    }
}
