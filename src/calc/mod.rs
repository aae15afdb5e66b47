pub mod date_provider;
pub mod grid;

pub use date_provider::{ChronoProvider, DateProvider};
pub use grid::{project, DayCell, MonthRelation, GRID_CELLS, GRID_DAYS, GRID_ROWS};
