//! Unit tests for recent-ride selection over multi-month spans.

use crate::support::{date, ride};
use ridelog::aggregates::{latest_ride, recent_rides, RecentWindow};
use ridelog::timeline::{build_timeline, calendar_grid};

#[test]
fn test_trailing_window_sorts_newest_first_across_months() {
    let grid = calendar_grid(date(2024, 6, 1), date(2024, 7, 20));
    let records = vec![
        ride(date(2024, 6, 25), 10.0, 3600.0, 30.0),
        ride(date(2024, 7, 15), 20.0, 3600.0, 60.0),
        ride(date(2024, 6, 10), 99.0, 3600.0, 99.0),
        ride(date(2024, 7, 2), 15.0, 3600.0, 45.0),
    ];
    let timeline = build_timeline(&grid, &records);
    let rides = recent_rides(&timeline, RecentWindow::TrailingDays(30), date(2024, 7, 20));

    let dates: Vec<_> = rides.iter().map(|r| r.date.as_str()).collect();
    // June 10 is older than the 30-day cutoff of June 20.
    assert_eq!(dates, vec!["2024-07-15", "2024-07-02", "2024-06-25"]);
    assert_eq!(rides[0].year, 2024);
    assert_eq!(rides[0].sport.as_deref(), Some("road"));
}

#[test]
fn test_latest_ride_on_a_double_ride_day_is_the_last_row() {
    let grid = calendar_grid(date(2024, 7, 1), date(2024, 7, 31));
    let mut morning = ride(date(2024, 7, 20), 10.0, 3600.0, 30.0);
    morning.work_kilojoules = Some(100.0);
    let mut evening = ride(date(2024, 7, 20), 20.0, 3600.0, 60.0);
    evening.work_kilojoules = Some(200.0);
    let timeline = build_timeline(&grid, &[morning, evening]);

    let latest = latest_ride(&timeline).unwrap();
    assert_eq!(latest.date, "2024-07-20");
    assert_eq!(latest.work_kilojoules, Some(200.0));
}

#[test]
fn test_absent_power_fields_stay_absent() {
    let grid = calendar_grid(date(2024, 7, 1), date(2024, 7, 31));
    let records = vec![ride(date(2024, 7, 10), 20.0, 3600.0, 60.0)];
    let timeline = build_timeline(&grid, &records);
    let rides = recent_rides(&timeline, RecentWindow::CurrentMonth, date(2024, 7, 31));

    let row = &rides[0];
    assert_eq!(row.avg_power, Some(200.0));
    assert_eq!(row.max_power, None);
    assert_eq!(row.normalized_power, None);
    assert_eq!(row.avg_cadence, None);
    assert_eq!(row.tss, Some(60.0));
    assert_eq!(row.power_balance.as_deref(), Some("52% R | 48% L"));
}

#[test]
fn test_cutoff_before_grid_start_keeps_everything() {
    let grid = calendar_grid(date(2024, 7, 1), date(2024, 7, 10));
    let records = vec![ride(date(2024, 7, 3), 20.0, 3600.0, 60.0)];
    let timeline = build_timeline(&grid, &records);
    let rides = recent_rides(&timeline, RecentWindow::TrailingDays(365), date(2024, 7, 10));
    assert_eq!(rides.len(), 1);
}
