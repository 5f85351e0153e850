//! Record normalizer: raw session fields to canonical units.
//!
//! One decoded session becomes one [`ActivityRecord`]. Distances,
//! climbs, speeds, temperatures, and work arrive metric and leave
//! imperial; calendar keys are derived from the session timestamp in
//! the reference zone. Fields with no mapping pass through untouched.

use crate::activity::decode::{RawSession, RawValue};
use crate::activity::record::{ActivityRecord, FieldValue};
use chrono::Datelike;
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// Meters to miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    (meters / 1000.0) * 0.621371
}

/// Meters to feet.
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * 3.28084
}

/// Celsius to Fahrenheit, rounded to a whole degree.
pub fn celsius_to_fahrenheit(celsius: f64) -> i32 {
    ((celsius * 9.0 / 5.0) + 32.0).round() as i32
}

/// Meters-per-second to miles-per-hour.
pub fn mps_to_mph(mps: f64) -> f64 {
    mps * 2.23694
}

/// Seconds to a `H:MM:SS` display string.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Pedal balance string from the raw left/right balance value.
///
/// The head unit packs the right-side share behind a flag bit; the
/// right fraction is `v / (32768 + v)`.
pub fn format_power_balance(raw: f64) -> String {
    let right = raw / (32768.0 + raw);
    let left = 1.0 - right;
    format!("{:.0}% R | {:.0}% L", right * 100.0, left * 100.0)
}

/// Normalize one session into a canonical record.
///
/// Returns `None` when the session has no timestamp; nothing else is
/// grounds for rejection.
pub fn normalize_session(session: &RawSession, zone: Tz) -> Option<ActivityRecord> {
    let Some(timestamp) = session.timestamp() else {
        tracing::warn!("Skipping session without a timestamp");
        return None;
    };

    let local_date = timestamp.with_timezone(&zone).date_naive();
    let iso = local_date.iso_week();

    let mut record = ActivityRecord {
        date: local_date.format("%Y-%m-%d").to_string(),
        year: local_date.year(),
        month: local_date.month(),
        iso_week: iso.week(),
        year_month: local_date.year() * 100 + local_date.month() as i32,
        year_week: format!("{}-{:02}", iso.year(), iso.week()),
        distance_miles: None,
        elapsed_time_seconds: None,
        elapsed_hms: None,
        timer_time_seconds: None,
        timer_hms: None,
        ascent_feet: None,
        descent_feet: None,
        avg_temp_f: None,
        avg_speed_mph: None,
        work_kilojoules: None,
        power_balance: None,
        extras: BTreeMap::new(),
    };

    for (name, value) in &session.fields {
        // Decoder-internal numeric indices carry no semantics.
        if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        match (name.as_str(), value.as_f64()) {
            ("timestamp", _) => {}
            ("total_distance", Some(v)) => record.distance_miles = Some(meters_to_miles(v)),
            ("total_elapsed_time", Some(v)) => {
                record.elapsed_time_seconds = Some(v);
                record.elapsed_hms = Some(format_hms(v.round() as u64));
            }
            ("total_timer_time", Some(v)) => {
                record.timer_time_seconds = Some(v);
                record.timer_hms = Some(format_hms(v.round() as u64));
            }
            ("total_ascent", Some(v)) => record.ascent_feet = Some(meters_to_feet(v)),
            ("total_descent", Some(v)) => record.descent_feet = Some(meters_to_feet(v)),
            ("avg_temperature", Some(v)) => record.avg_temp_f = Some(celsius_to_fahrenheit(v)),
            ("avg_speed", Some(v)) => record.avg_speed_mph = Some(mps_to_mph(v)),
            ("total_work", Some(v)) => record.work_kilojoules = Some(v / 1000.0),
            ("left_right_balance", Some(v)) => {
                record.power_balance = Some(format_power_balance(v))
            }
            // Volatile experimental metrics, dropped unconditionally.
            ("total_grit", _) | ("avg_flow", _) => {}
            _ => {
                record
                    .extras
                    .insert(name.clone(), pass_through(value, zone));
            }
        }
    }

    Some(record)
}

/// Normalize a batch of sessions, dropping the unusable ones.
pub fn normalize_sessions(sessions: &[RawSession], zone: Tz) -> Vec<ActivityRecord> {
    let records: Vec<ActivityRecord> = sessions
        .iter()
        .filter_map(|session| normalize_session(session, zone))
        .collect();

    if records.len() < sessions.len() {
        tracing::warn!(
            "Skipped {} of {} sessions during normalization",
            sessions.len() - records.len(),
            sessions.len()
        );
    }

    records
}

fn pass_through(value: &RawValue, zone: Tz) -> FieldValue {
    match value {
        RawValue::Timestamp(t) => FieldValue::Text(
            t.with_timezone(&zone)
                .format("%Y-%m-%d %H:%M:%S%:z")
                .to_string(),
        ),
        RawValue::Float(v) => FieldValue::Float(*v),
        RawValue::Int(v) => FieldValue::Int(*v),
        RawValue::Text(s) => FieldValue::Text(s.clone()),
    }
}
