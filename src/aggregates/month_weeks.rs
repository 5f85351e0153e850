//! Week-by-week summary of a calendar month.
//!
//! ISO weeks straddle month boundaries, so the summary walks an
//! extended range around the target month and keeps every week whose
//! `[week_start, week_end]` interval touches it. A straddling week is
//! reported once, with all of its rides, even those on dates outside
//! the month.

use crate::activity::ActivityRecord;
use crate::aggregates::round_dp;
use crate::timeline::calendar::{month_bounds, week_start, year_week_key};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// One week's totals in the month summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    /// ISO week key, `"{iso_year}-{week:02}"`
    pub year_week: String,
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Sunday of the week
    pub week_end: NaiveDate,
    /// Display range, `"Jul 01 - Jul 07"`
    pub week_range: String,
    /// Distance in miles, rounded to 1 decimal
    pub distance: f64,
    /// Riding hours, rounded to 1 decimal
    pub hours: f64,
    /// Work in kilojoules, rounded to whole units
    pub kilojoules: f64,
    /// Training stress, rounded to whole units
    pub tss: f64,
    /// Climbing in feet, rounded to whole units
    pub ascent: f64,
    /// Descending in feet, rounded to whole units
    pub descent: f64,
}

/// Totals across a month's summarized weeks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthTotals {
    /// Distance in miles
    pub distance: f64,
    /// Riding hours
    pub hours: f64,
    /// Work in kilojoules
    pub kilojoules: f64,
    /// Training stress
    pub tss: f64,
    /// Climbing in feet
    pub ascent: f64,
    /// Descending in feet
    pub descent: f64,
}

/// Summarize every ISO week that overlaps the month containing
/// `target`, ascending by week start.
///
/// Weeks come from ride records in the extended range around the
/// month; a month with no rides anywhere near it yields an empty list,
/// which callers render as a "no rides this month" state.
pub fn month_weekly_summary(records: &[ActivityRecord], target: NaiveDate) -> Vec<WeekSummary> {
    let (first_day, last_day) = month_bounds(target);
    let extended_start = week_start(first_day) - Duration::days(1);
    let extended_end = week_start(last_day) + Duration::days(7);

    // Ride rows inside the extended range, tagged with their date.
    let in_range: Vec<(&ActivityRecord, NaiveDate)> = records
        .iter()
        .filter(|record| record.elapsed_time_seconds.is_some())
        .filter_map(|record| record.naive_date().map(|date| (record, date)))
        .filter(|(_, date)| *date >= extended_start && *date <= extended_end)
        .collect();

    // Distinct weeks that intersect the month.
    let mut weeks: BTreeMap<NaiveDate, String> = BTreeMap::new();
    for (_, date) in &in_range {
        let start = week_start(*date);
        let end = start + Duration::days(6);
        if start <= last_day && end >= first_day {
            weeks.entry(start).or_insert_with(|| year_week_key(*date));
        }
    }

    weeks
        .into_iter()
        .map(|(start, year_week)| {
            let end = start + Duration::days(6);

            let mut distance = 0.0;
            let mut seconds = 0.0;
            let mut kilojoules = 0.0;
            let mut tss = 0.0;
            let mut ascent = 0.0;
            let mut descent = 0.0;
            for (record, date) in &in_range {
                if week_start(*date) != start {
                    continue;
                }
                distance += record.distance_miles.unwrap_or(0.0);
                seconds += record.timer_time_seconds.unwrap_or(0.0);
                kilojoules += record.work_kilojoules.unwrap_or(0.0);
                tss += record.tss().unwrap_or(0.0);
                ascent += record.ascent_feet.unwrap_or(0.0);
                descent += record.descent_feet.unwrap_or(0.0);
            }

            WeekSummary {
                year_week,
                week_start: start,
                week_end: end,
                week_range: format!("{} - {}", start.format("%b %d"), end.format("%b %d")),
                distance: round_dp(distance, 1),
                hours: round_dp(seconds / 3600.0, 1),
                kilojoules: round_dp(kilojoules, 0),
                tss: round_dp(tss, 0),
                ascent: round_dp(ascent, 0),
                descent: round_dp(descent, 0),
            }
        })
        .collect()
}

/// Sum a month's weekly summaries into one totals row.
pub fn month_totals(weeks: &[WeekSummary]) -> MonthTotals {
    weeks.iter().fold(MonthTotals::default(), |acc, week| MonthTotals {
        distance: acc.distance + week.distance,
        hours: acc.hours + week.hours,
        kilojoules: acc.kilojoules + week.kilojoules,
        tss: acc.tss + week.tss,
        ascent: acc.ascent + week.ascent,
        descent: acc.descent + week.descent,
    })
}
