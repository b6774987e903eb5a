//! Presentation projections built from the agenda pipeline.

pub mod list;
pub mod navigation;
pub mod utils;
pub mod week_grid;

pub use list::{AgendaList, DaySection};
pub use navigation::{navigate, offset_weeks, Navigation};
pub use week_grid::{EventBlock, WeekGrid};
