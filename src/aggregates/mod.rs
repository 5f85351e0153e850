//! Reducers over the timeline and the historical record set.
//!
//! Calendar-bucket totals and recent-ride selection come off the
//! gap-filled timeline; the month summarizer works from the raw record
//! set because its straddling weeks reach outside any single span.

pub mod buckets;
pub mod month_weeks;
pub mod recent;

pub use buckets::{
    annual_totals, daily_totals, monthly_totals, weekly_totals, AnnualTotal, DailyTotal,
    MonthlyTotal, WeeklyTotal,
};
pub use month_weeks::{month_totals, month_weekly_summary, MonthTotals, WeekSummary};
pub use recent::{latest_ride, recent_rides, RecentError, RecentRide, RecentWindow};

/// Round to a fixed number of decimal places, half away from zero.
pub(crate) fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
