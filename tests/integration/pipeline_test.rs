//! Integration tests for the complete history pipeline.
//!
//! Tests the end-to-end flow:
//! 1. Merge a batch of rides into the store
//! 2. Persist the store and reload it from disk
//! 3. Build the calendar timeline over the reporting span
//! 4. Reduce to bucket totals and presentation tables
//! 5. Re-run the merge to confirm nothing duplicates

use chrono::{Datelike, NaiveDate};
use ridelog::activity::{ActivityRecord, FieldValue};
use ridelog::aggregates::{
    annual_totals, daily_totals, month_totals, month_weekly_summary, monthly_totals, recent_rides,
    weekly_totals, RecentWindow,
};
use ridelog::report::{latest_ride_table, month_summary_table, monthly_tss_table, recent_rides_table};
use ridelog::storage::history::{self, HistoricalStore};
use ridelog::timeline::{build_timeline, calendar_grid};
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ride(day: NaiveDate, miles: f64, timer_seconds: f64, tss: f64) -> ActivityRecord {
    let iso = day.iso_week();
    let mut extras = BTreeMap::new();
    extras.insert(
        "training_stress_score".to_string(),
        FieldValue::Float(tss),
    );
    extras.insert("avg_power".to_string(), FieldValue::Int(210));
    extras.insert(
        "sub_sport".to_string(),
        FieldValue::Text("road".to_string()),
    );
    ActivityRecord {
        date: day.format("%Y-%m-%d").to_string(),
        year: day.year(),
        month: day.month(),
        iso_week: iso.week(),
        year_month: day.year() * 100 + day.month() as i32,
        year_week: format!("{}-{:02}", iso.year(), iso.week()),
        distance_miles: Some(miles),
        elapsed_time_seconds: Some(timer_seconds + 120.0),
        elapsed_hms: Some("1:02:00".to_string()),
        timer_time_seconds: Some(timer_seconds),
        timer_hms: Some("1:00:00".to_string()),
        ascent_feet: Some(1500.0),
        descent_feet: Some(1480.0),
        avg_temp_f: Some(72),
        avg_speed_mph: Some(17.2),
        work_kilojoules: Some(700.0),
        power_balance: Some("51% R | 49% L".to_string()),
        extras,
    }
}

#[test]
fn test_merge_persist_reload_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let today = date(2024, 7, 20);

    let batch = vec![
        ride(date(2024, 6, 28), 18.0, 3600.0, 55.0),
        ride(date(2024, 7, 2), 25.0, 5400.0, 90.0),
        ride(date(2024, 7, 15), 32.5, 7200.0, 110.0),
    ];

    // First run: everything is new.
    let store = HistoricalStore::default();
    let merged = store.merge(&batch);
    assert_eq!(merged.len(), 3);
    let saved_path = history::save(&merged, dir.path()).unwrap();
    assert!(saved_path.ends_with("HL_Summary_20240715.json"));

    // Reload from disk and report over the stored history.
    let loaded = history::load_latest(dir.path()).unwrap();
    assert_eq!(loaded.len(), 3);

    let (start, end) = loaded.reporting_span(today);
    assert_eq!(start, date(2024, 6, 28));
    assert_eq!(end, date(2024, 7, 15));

    let timeline = build_timeline(&calendar_grid(start, end), loaded.records());
    assert_eq!(timeline.len(), 18);
    assert_eq!(timeline.ride_rows().count(), 3);

    let daily = daily_totals(&timeline);
    assert_eq!(daily.len(), 18);
    assert_eq!(daily.iter().map(|d| d.distance_miles).sum::<f64>(), 75.5);

    let weekly = weekly_totals(&timeline, None);
    assert_eq!(weekly.len(), 3);
    assert_eq!(weekly[0].week_start, date(2024, 7, 15));

    let monthly = monthly_totals(&timeline);
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].year_month, 202406);
    assert_eq!(monthly[1].distance_miles, 57.5);

    let annual = annual_totals(&timeline);
    assert_eq!(annual.len(), 1);
    assert_eq!(annual[0].hours, 4.5);

    let latest = latest_ride_table(&timeline).unwrap();
    assert_eq!(latest.rows[0], vec!["Date", "2024-07-15"]);

    let tss = monthly_tss_table(loaded.records()).unwrap();
    assert_eq!(tss.columns, vec!["yrmo", "training_stress_score"]);
    assert_eq!(tss.rows[1], vec!["202407".to_string(), "200".to_string()]);
}

#[test]
fn test_second_run_with_same_batch_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let batch = vec![
        ride(date(2024, 7, 2), 25.0, 5400.0, 90.0),
        ride(date(2024, 7, 15), 32.5, 7200.0, 110.0),
    ];

    let first = HistoricalStore::default().merge(&batch);
    history::save(&first, dir.path()).unwrap();

    // Second run re-imports the same files after a reload.
    let loaded = history::load_latest(dir.path()).unwrap();
    let second = loaded.merge(&batch);
    assert_eq!(second.len(), loaded.len());
    assert_eq!(second.records(), loaded.records());
}

#[test]
fn test_later_batch_extends_the_history() {
    let dir = tempfile::tempdir().unwrap();
    let june = vec![ride(date(2024, 6, 28), 18.0, 3600.0, 55.0)];
    let july = vec![
        ride(date(2024, 6, 28), 18.0, 3600.0, 55.0),
        ride(date(2024, 7, 2), 25.0, 5400.0, 90.0),
    ];

    let first = HistoricalStore::default().merge(&june);
    let first_path = history::save(&first, dir.path()).unwrap();
    assert!(first_path.ends_with("HL_Summary_20240628.json"));

    let loaded = history::load_file(&first_path).unwrap();
    let second = loaded.merge(&july);
    assert_eq!(second.len(), 2);

    let second_path = history::save(&second, dir.path()).unwrap();
    assert!(second_path.ends_with("HL_Summary_20240702.json"));
    assert_eq!(history::load_file(&second_path).unwrap().len(), 2);
}

#[test]
fn test_month_report_over_reloaded_history() {
    let dir = tempfile::tempdir().unwrap();
    let today = date(2024, 7, 20);
    let batch = vec![
        ride(date(2024, 7, 2), 25.0, 5400.0, 90.0),
        ride(date(2024, 7, 15), 32.5, 7200.0, 110.0),
        ride(date(2024, 7, 16), 10.0, 1800.0, 35.0),
    ];
    let merged = HistoricalStore::default().merge(&batch);
    history::save(&merged, dir.path()).unwrap();
    let loaded = history::load_latest(dir.path()).unwrap();

    let weeks = month_weekly_summary(loaded.records(), today);
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[1].distance, 42.5);
    assert_eq!(weeks[1].hours, 2.5);

    let table = month_summary_table(&weeks, &month_totals(&weeks));
    assert_eq!(table.rows.last().unwrap()[1], "67.5");

    let month_grid = calendar_grid(date(2024, 7, 1), today);
    let month_timeline = build_timeline(&month_grid, loaded.records());
    let recent = recent_rides(&month_timeline, RecentWindow::CurrentMonth, today);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date, "2024-07-16");
    assert_eq!(recent_rides_table(&recent).rows.len(), 3);
}
