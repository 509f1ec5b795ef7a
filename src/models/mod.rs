// Module exports for models

pub mod interval;
pub mod roster;
pub mod settings;
