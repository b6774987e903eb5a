pub mod date;
pub mod geometry;
