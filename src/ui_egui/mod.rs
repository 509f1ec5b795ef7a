// egui front end for the shift timeline
// Drawable scene, pointer state machine and the engine facade

mod app;
pub mod drawable;
pub mod interaction;
pub mod painter_surface;
pub mod palette;
pub mod timeline;

pub use app::TimelineApp;
pub use timeline::ShiftTimeline;
