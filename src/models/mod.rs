// Module exports for models

pub mod event;
pub mod filter;
pub mod popup;
pub mod settings;
