//! RideLog - Cycling Activity History and Training Load
//!
//! Ingests FIT ride files, normalizes them into a canonical unit system,
//! accumulates them in a deduplicated JSON history, and reduces the result
//! into calendar-bucketed totals, month summaries, and a rolling chronic
//! training load signal.

pub mod activity;
pub mod aggregates;
pub mod report;
pub mod storage;
pub mod timeline;

// Re-export commonly used types
pub use activity::{ActivityRecord, FieldValue};
pub use aggregates::{RecentWindow, WeekSummary};
pub use report::Table;
pub use storage::{AppConfig, HistoricalStore};
pub use timeline::{Timeline, TimelineRow};
