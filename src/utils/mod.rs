// Utility module exports

pub mod cache;
pub mod date;
