// Service module exports

pub mod agenda;
pub mod loader;
pub mod notification;
pub mod settings;
pub mod source;
