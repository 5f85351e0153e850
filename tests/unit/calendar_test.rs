//! Unit tests for calendar grid properties over longer spans.

use crate::support::date;
use chrono::{Datelike, Duration, Weekday};
use ridelog::timeline::calendar::year_week_key;
use ridelog::timeline::{calendar_grid, month_bounds, week_end, week_start};

#[test]
fn test_grid_is_gap_free_across_year_boundaries() {
    let start = date(2023, 12, 1);
    let end = date(2024, 3, 10);
    let grid = calendar_grid(start, end);

    assert_eq!(grid.len() as i64, (end - start).num_days() + 1);
    for (i, day) in grid.iter().enumerate() {
        assert_eq!(day.date, start + Duration::days(i as i64));
        assert_eq!(day.year, day.date.year());
    }
    // Leap day sits in the middle of the span.
    assert!(grid.iter().any(|day| day.date == date(2024, 2, 29)));
}

#[test]
fn test_week_bounds_bracket_every_day() {
    let mut day = date(2024, 1, 1);
    let end = date(2024, 12, 31);
    while day <= end {
        let start = week_start(day);
        let finish = week_end(day);
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(finish - start, Duration::days(6));
        assert!(start <= day && day <= finish);
        day += Duration::days(1);
    }
}

#[test]
fn test_days_in_one_week_share_a_key() {
    let monday = date(2024, 7, 15);
    let key = year_week_key(monday);
    for offset in 0..7 {
        assert_eq!(year_week_key(monday + Duration::days(offset)), key);
    }
    assert_ne!(year_week_key(monday + Duration::days(7)), key);
}

#[test]
fn test_month_bounds_bracket_every_month_of_a_leap_year() {
    for month in 1..=12 {
        let mid = date(2024, month, 15);
        let (first, last) = month_bounds(mid);
        assert_eq!(first.day(), 1);
        assert_eq!(first.month(), month);
        assert_eq!(last.month(), month);
        assert!(first <= mid && mid <= last);
        assert_eq!((last + Duration::days(1)).day(), 1);
    }
}
