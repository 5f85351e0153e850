//! Calendar grid construction and week/month boundary math.

use chrono::{Datelike, Duration, NaiveDate};

/// One calendar day in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The date
    pub date: NaiveDate,
    /// Calendar year of the date
    pub year: i32,
}

/// Build the gap-free inclusive date span `[start, end]`.
///
/// `end` before `start` yields an empty grid; emptiness, not an error,
/// is the "no data" signal.
pub fn calendar_grid(start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(CalendarDay {
            date: current,
            year: current.year(),
        });
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Monday of the date's ISO week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday of the date's ISO week.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// ISO week key for a date, `"{iso_year}-{week:02}"`.
pub fn year_week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-{:02}", iso.year(), iso.week())
}

/// First and last day of the date's calendar month.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let next_month_first = NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() + 1, 1, 1));
    let last = next_month_first
        .and_then(|d| d.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// Month-to-date span: first of the month through `today`.
pub fn current_month_span(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (first, _) = month_bounds(today);
    (first, today)
}
