//! Timeline construction: calendar left join and rolling training load.
//!
//! The rolling mean runs over the gap-filled, date-ordered rows so
//! rest days count as zero-stress days inside the window. Joining
//! before windowing is what makes the load signal correct; windowing
//! the sparse ride list would silently skip rest days.

use crate::activity::ActivityRecord;
use crate::timeline::calendar::CalendarDay;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Trailing window length of the chronic training load mean, in rows.
pub const CTL_WINDOW: usize = 42;

/// One row of the gap-filled timeline.
///
/// A date with several rides appears once per ride; a date with none
/// appears once with no record.
#[derive(Debug, Clone)]
pub struct TimelineRow {
    /// Calendar date of the row
    pub date: NaiveDate,
    /// Calendar year of the date
    pub year: i32,
    /// The ride on this date, absent on rest days
    pub record: Option<ActivityRecord>,
    /// Training stress score, zero-filled on rest days
    pub tss: f64,
    /// Trailing mean of `tss` over [`CTL_WINDOW`] rows; absent until
    /// the window is full
    pub ctl: Option<f64>,
}

impl TimelineRow {
    /// Whether this row carries a ride.
    ///
    /// The marker is the elapsed-time field, the same field the
    /// ride-only views test.
    pub fn is_ride(&self) -> bool {
        self.record
            .as_ref()
            .is_some_and(|r| r.elapsed_time_seconds.is_some())
    }
}

/// Date-ordered, gap-filled view of a span of riding history.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Rows in ascending date order
    pub rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the timeline has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that carry a ride, in date order.
    pub fn ride_rows(&self) -> impl Iterator<Item = &TimelineRow> {
        self.rows.iter().filter(|row| row.is_ride())
    }
}

/// Left-join a calendar grid with activity records by date and compute
/// the rolling training load.
///
/// Records outside the grid's span are dropped by the join. Records on
/// the same date keep their input order.
pub fn build_timeline(grid: &[CalendarDay], records: &[ActivityRecord]) -> Timeline {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ActivityRecord>> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.naive_date() {
            by_date.entry(date).or_default().push(record);
        }
    }

    let mut rows = Vec::with_capacity(grid.len());
    for day in grid {
        match by_date.get(&day.date) {
            Some(rides) => {
                for record in rides {
                    rows.push(TimelineRow {
                        date: day.date,
                        year: day.year,
                        record: Some((*record).clone()),
                        tss: record.tss().unwrap_or(0.0),
                        ctl: None,
                    });
                }
            }
            None => rows.push(TimelineRow {
                date: day.date,
                year: day.year,
                record: None,
                tss: 0.0,
                ctl: None,
            }),
        }
    }

    let stress: Vec<f64> = rows.iter().map(|row| row.tss).collect();
    for i in (CTL_WINDOW - 1)..rows.len() {
        let window = &stress[i + 1 - CTL_WINDOW..=i];
        rows[i].ctl = Some(window.iter().sum::<f64>() / CTL_WINDOW as f64);
    }

    Timeline { rows }
}
