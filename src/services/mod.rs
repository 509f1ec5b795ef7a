// Service module exports

pub mod layout;
pub mod projection;
pub mod roster;
pub mod settings;
pub mod viewport;
