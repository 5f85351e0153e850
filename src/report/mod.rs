//! Presentation-boundary projections.
//!
//! Aggregates cross to the consumer as [`Table`] values; this module
//! owns the display formatting and the column-name contract.

pub mod format;
pub mod table;

pub use table::{
    annual_table, daily_table, latest_ride_table, month_summary_table, monthly_table,
    monthly_tss_table, recent_rides_table, weekly_table, ReportError, Table,
    TSS_COLUMN_CANDIDATES,
};
