//! Daily, weekly, monthly, and annual reductions of the timeline.
//!
//! Daily totals cover every grid date, so rest days show up as zeros.
//! Monthly and annual totals group by keys carried on ride records, so
//! only periods containing at least one ride appear. Weekly totals
//! reduce ride rows onto ISO weeks anchored on Monday.

use crate::aggregates::round_dp;
use crate::timeline::calendar::{week_start, year_week_key};
use crate::timeline::Timeline;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distance and riding time for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    /// Date key, `YYYY-MM-DD`
    pub date: String,
    /// Total distance in miles
    pub distance_miles: f64,
    /// Riding hours, rounded to 2 decimals
    pub hours: f64,
}

/// Distance and riding time for one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTotal {
    /// ISO week key, `"{iso_year}-{week:02}"`
    pub year_week: String,
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Week start for display, e.g. `"Mon, Jul 15, 2024"`
    pub week_start_display: String,
    /// Total distance in miles, rounded to 1 decimal
    pub distance_miles: f64,
    /// Riding hours, rounded to 1 decimal
    pub hours: f64,
}

/// Distance and riding time for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// Integer month key, `year * 100 + month`
    pub year_month: i32,
    /// Total distance in miles
    pub distance_miles: f64,
    /// Riding hours, rounded to 2 decimals
    pub hours: f64,
}

/// Distance and riding time for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualTotal {
    /// Calendar year
    pub year: i32,
    /// Total distance in miles
    pub distance_miles: f64,
    /// Riding hours, rounded to 2 decimals
    pub hours: f64,
}

/// Reduce the timeline to per-day totals, ascending by date.
///
/// Every date in the underlying grid appears; days without rides sum
/// to zero.
pub fn daily_totals(timeline: &Timeline) -> Vec<DailyTotal> {
    let mut groups: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for row in &timeline.rows {
        let entry = groups.entry(row.date).or_insert((0.0, 0.0));
        if let Some(record) = &row.record {
            entry.0 += record.distance_miles.unwrap_or(0.0);
            entry.1 += record.timer_time_seconds.unwrap_or(0.0);
        }
    }

    groups
        .into_iter()
        .map(|(date, (distance, seconds))| DailyTotal {
            date: date.format("%Y-%m-%d").to_string(),
            distance_miles: distance,
            hours: round_dp(seconds / 3600.0, 2),
        })
        .collect()
}

/// Reduce ride rows to per-week totals, most recent week first.
///
/// When `num_weeks` is given only that many of the most recent weeks
/// are returned.
pub fn weekly_totals(timeline: &Timeline, num_weeks: Option<usize>) -> Vec<WeeklyTotal> {
    let mut groups: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for row in timeline.ride_rows() {
        let Some(record) = row.record.as_ref() else {
            continue;
        };
        let entry = groups.entry(week_start(row.date)).or_insert((0.0, 0.0));
        entry.0 += record.distance_miles.unwrap_or(0.0);
        entry.1 += record.timer_time_seconds.unwrap_or(0.0);
    }

    let mut totals: Vec<WeeklyTotal> = groups
        .into_iter()
        .rev()
        .map(|(monday, (distance, seconds))| WeeklyTotal {
            year_week: year_week_key(monday),
            week_start: monday,
            week_start_display: monday.format("%a, %b %d, %Y").to_string(),
            distance_miles: round_dp(distance, 1),
            hours: round_dp(seconds / 3600.0, 1),
        })
        .collect();

    if let Some(limit) = num_weeks {
        totals.truncate(limit);
    }

    totals
}

/// Reduce ride records to per-month totals, ascending by month key.
pub fn monthly_totals(timeline: &Timeline) -> Vec<MonthlyTotal> {
    let mut groups: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for row in &timeline.rows {
        let Some(record) = &row.record else {
            continue;
        };
        let entry = groups.entry(record.year_month).or_insert((0.0, 0.0));
        entry.0 += record.distance_miles.unwrap_or(0.0);
        entry.1 += record.timer_time_seconds.unwrap_or(0.0);
    }

    groups
        .into_iter()
        .map(|(year_month, (distance, seconds))| MonthlyTotal {
            year_month,
            distance_miles: distance,
            hours: round_dp(seconds / 3600.0, 2),
        })
        .collect()
}

/// Reduce ride records to per-year totals, ascending by year.
pub fn annual_totals(timeline: &Timeline) -> Vec<AnnualTotal> {
    let mut groups: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for row in &timeline.rows {
        let Some(record) = &row.record else {
            continue;
        };
        let entry = groups.entry(record.year).or_insert((0.0, 0.0));
        entry.0 += record.distance_miles.unwrap_or(0.0);
        entry.1 += record.timer_time_seconds.unwrap_or(0.0);
    }

    groups
        .into_iter()
        .map(|(year, (distance, seconds))| AnnualTotal {
            year,
            distance_miles: distance,
            hours: round_dp(seconds / 3600.0, 2),
        })
        .collect()
}
