//! Calendar grids and the gap-filled ride timeline.

pub mod calendar;
pub mod merge;

pub use calendar::{calendar_grid, current_month_span, month_bounds, week_end, week_start, CalendarDay};
pub use merge::{build_timeline, Timeline, TimelineRow, CTL_WINDOW};
