//! Ride-only views of the near past, newest first.

use crate::activity::ActivityRecord;
use crate::aggregates::round_dp;
use crate::timeline::Timeline;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Which slice of the timeline the selector keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentWindow {
    /// Every ride row; the caller has already scoped the timeline to
    /// the month of interest.
    CurrentMonth,
    /// Ride rows dated within the trailing `days` before today,
    /// inclusive of the boundary date.
    TrailingDays(i64),
}

#[derive(Debug, Error)]
pub enum RecentError {
    #[error("no rides in range")]
    NoRides,
}

/// One ride projected for the recent-rides table.
///
/// Field names follow the presentation columns; distance, ascent and
/// descent are pre-rounded to 2 decimals and work to whole kilojoules,
/// while hours stays at full precision for downstream formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRide {
    pub year: i32,
    pub sport: Option<String>,
    pub hours: Option<f64>,
    pub date: String,
    pub riding_time: Option<String>,
    pub pedal_time: Option<String>,
    pub distance: Option<f64>,
    pub kilojoules: Option<f64>,
    pub avg_power: Option<f64>,
    pub max_power: Option<f64>,
    pub normalized_power: Option<f64>,
    pub tss: Option<f64>,
    pub intensity_factor: Option<f64>,
    pub power_balance: Option<String>,
    pub avg_cadence: Option<f64>,
    pub ascent: Option<f64>,
    pub descent: Option<f64>,
}

impl RecentRide {
    fn project(year: i32, record: &ActivityRecord) -> RecentRide {
        RecentRide {
            year,
            sport: record.extra_str("sub_sport").map(str::to_string),
            hours: record.timer_time_seconds.map(|s| s / 3600.0),
            date: record.date.clone(),
            riding_time: record.elapsed_hms.clone(),
            pedal_time: record.timer_hms.clone(),
            distance: record.distance_miles.map(|v| round_dp(v, 2)),
            kilojoules: record.work_kilojoules.map(|v| round_dp(v, 0)),
            avg_power: record.extra_f64("avg_power"),
            max_power: record.extra_f64("max_power"),
            normalized_power: record.extra_f64("normalized_power"),
            tss: record.tss(),
            intensity_factor: record.extra_f64("intensity_factor"),
            power_balance: record.power_balance.clone(),
            avg_cadence: record.extra_f64("avg_cadence"),
            ascent: record.ascent_feet.map(|v| round_dp(v, 2)),
            descent: record.descent_feet.map(|v| round_dp(v, 2)),
        }
    }
}

/// Project the timeline's ride rows for the recent-rides table,
/// newest date first.
///
/// Same-date rides keep their timeline order. `today` only matters in
/// trailing-window mode.
pub fn recent_rides(timeline: &Timeline, window: RecentWindow, today: NaiveDate) -> Vec<RecentRide> {
    let cutoff = match window {
        RecentWindow::CurrentMonth => None,
        RecentWindow::TrailingDays(days) => Some(today - Duration::days(days)),
    };

    let mut rides: Vec<(NaiveDate, RecentRide)> = timeline
        .ride_rows()
        .filter(|row| cutoff.is_none_or(|earliest| row.date >= earliest))
        .filter_map(|row| {
            row.record
                .as_ref()
                .map(|record| (row.date, RecentRide::project(row.year, record)))
        })
        .collect();
    rides.sort_by(|a, b| b.0.cmp(&a.0));
    rides.into_iter().map(|(_, ride)| ride).collect()
}

/// The most recent ride on the timeline.
pub fn latest_ride(timeline: &Timeline) -> Result<&ActivityRecord, RecentError> {
    timeline
        .rows
        .iter()
        .rev()
        .find(|row| row.is_ride())
        .and_then(|row| row.record.as_ref())
        .ok_or(RecentError::NoRides)
}
