//! Tabular projections of the aggregates.
//!
//! Everything crossing the presentation boundary goes through [`Table`]:
//! ordered column names plus rows of display cells, nothing else. Column
//! names are part of the contract with the consumer and stay stable even
//! where they read oddly as prose.

use crate::activity::ActivityRecord;
use crate::aggregates::{
    latest_ride, AnnualTotal, DailyTotal, MonthTotals, MonthlyTotal, RecentError, RecentRide,
    WeekSummary, WeeklyTotal,
};
use crate::report::format::{decimal, grouped, optional_decimal, optional_text, optional_trimmed};
use crate::timeline::Timeline;
use std::collections::BTreeMap;
use thiserror::Error;

/// Column names searched, in order, for a training stress series.
pub const TSS_COLUMN_CANDIDATES: [&str; 3] = ["training_stress_score", "TSS", "tss_total"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no rides in range")]
    NoRides,
    #[error("no training stress column available")]
    TrainingStressUnavailable,
}

/// An ordered-row tabular structure for the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(columns: &[&str], rows: Vec<Vec<String>>) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Render as plain text with space-aligned columns.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();
        render_line(&mut out, &self.columns, &widths);
        for row in &self.rows {
            render_line(&mut out, row, &widths);
        }
        out
    }
}

fn render_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(cell.len());
        out.push_str(cell);
        for _ in cell.len()..width {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

/// Daily distance and time totals.
pub fn daily_table(days: &[DailyTotal]) -> Table {
    let rows = days
        .iter()
        .map(|day| {
            vec![
                day.date.clone(),
                decimal(day.distance_miles, 2),
                decimal(day.hours, 2),
            ]
        })
        .collect();
    Table::new(&["date", "Distance_miles", "total_timer_time"], rows)
}

/// Weekly totals, newest week first.
pub fn weekly_table(weeks: &[WeeklyTotal]) -> Table {
    let rows = weeks
        .iter()
        .map(|week| {
            vec![
                week.year_week.clone(),
                week.week_start_display.clone(),
                decimal(week.distance_miles, 1),
                decimal(week.hours, 1),
            ]
        })
        .collect();
    Table::new(&["year_week", "week_start", "Distance_miles", "hours"], rows)
}

/// Monthly totals keyed by the integer month key.
pub fn monthly_table(months: &[MonthlyTotal]) -> Table {
    let rows = months
        .iter()
        .map(|month| {
            vec![
                month.year_month.to_string(),
                decimal(month.distance_miles, 2),
                decimal(month.hours, 2),
            ]
        })
        .collect();
    Table::new(&["yrmo", "Distance_miles", "total_timer_time"], rows)
}

/// Annual totals.
pub fn annual_table(years: &[AnnualTotal]) -> Table {
    let rows = years
        .iter()
        .map(|year| {
            vec![
                year.year.to_string(),
                decimal(year.distance_miles, 2),
                decimal(year.hours, 2),
            ]
        })
        .collect();
    Table::new(&["yr", "Distance_miles", "total_timer_time"], rows)
}

/// The recent-rides table; `hours` feeds the ride graph, not this table.
pub fn recent_rides_table(rides: &[RecentRide]) -> Table {
    let rows = rides
        .iter()
        .map(|ride| {
            vec![
                ride.year.to_string(),
                optional_text(ride.sport.as_deref()),
                ride.date.clone(),
                optional_text(ride.riding_time.as_deref()),
                optional_text(ride.pedal_time.as_deref()),
                optional_decimal(ride.distance, 2),
                optional_decimal(ride.kilojoules, 0),
                optional_trimmed(ride.avg_power),
                optional_trimmed(ride.max_power),
                optional_trimmed(ride.normalized_power),
                optional_trimmed(ride.tss),
                optional_trimmed(ride.intensity_factor),
                optional_text(ride.power_balance.as_deref()),
                optional_trimmed(ride.avg_cadence),
                optional_decimal(ride.ascent, 2),
                optional_decimal(ride.descent, 2),
            ]
        })
        .collect();
    Table::new(
        &[
            "yr",
            "sport",
            "date",
            "RidingTime",
            "PedalTime",
            "Distance",
            "Kjs",
            "avg_power",
            "max_power",
            "NP",
            "TSS",
            "IF",
            "PowerBalance",
            "avg_cadence",
            "ascent",
            "descent",
        ],
        rows,
    )
}

/// Metric/value listing for the newest ride on the timeline.
pub fn latest_ride_table(timeline: &Timeline) -> Result<Table, ReportError> {
    let record = latest_ride(timeline).map_err(|RecentError::NoRides| ReportError::NoRides)?;

    let metric = |name: &str, value: String| vec![name.to_string(), value];
    let rows = vec![
        metric("Date", record.date.clone()),
        metric("Sport", optional_text(record.extra_str("sub_sport"))),
        metric(
            "Distance (miles)",
            optional_decimal(record.distance_miles, 2),
        ),
        metric("Riding Time", optional_text(record.elapsed_hms.as_deref())),
        metric("Pedal Time", optional_text(record.timer_hms.as_deref())),
        metric(
            "Work (Kj)",
            optional_text(record.work_kilojoules.map(grouped).as_deref()),
        ),
        metric("Average Power", optional_trimmed(record.extra_f64("avg_power"))),
        metric("Max Power", optional_trimmed(record.extra_f64("max_power"))),
        metric(
            "Normalized Power",
            optional_trimmed(record.extra_f64("normalized_power")),
        ),
        metric("Training Stress Score", optional_trimmed(record.tss())),
        metric(
            "Intensity Factor",
            optional_trimmed(record.extra_f64("intensity_factor")),
        ),
        metric(
            "Power Balance",
            optional_text(record.power_balance.as_deref()),
        ),
        metric(
            "Average Cadence",
            optional_trimmed(record.extra_f64("avg_cadence")),
        ),
        metric(
            "Ascent (ft)",
            optional_text(record.ascent_feet.map(grouped).as_deref()),
        ),
        metric(
            "Descent (ft)",
            optional_text(record.descent_feet.map(grouped).as_deref()),
        ),
    ];
    Ok(Table::new(&["Metric", "Value"], rows))
}

/// The month's weekly breakdown plus its TOTAL row.
pub fn month_summary_table(weeks: &[WeekSummary], totals: &MonthTotals) -> Table {
    let mut rows: Vec<Vec<String>> = weeks
        .iter()
        .map(|week| {
            vec![
                week.week_range.clone(),
                decimal(week.distance, 1),
                decimal(week.hours, 1),
                grouped(week.kilojoules),
                decimal(week.tss, 0),
                grouped(week.ascent),
                grouped(week.descent),
            ]
        })
        .collect();
    rows.push(vec![
        "TOTAL".to_string(),
        decimal(totals.distance, 1),
        decimal(totals.hours, 1),
        grouped(totals.kilojoules),
        decimal(totals.tss, 0),
        grouped(totals.ascent),
        grouped(totals.descent),
    ]);
    Table::new(
        &[
            "Week",
            "Distance (mi)",
            "Hours",
            "Work (Kj)",
            "TSS",
            "Ascent (ft)",
            "Descent (ft)",
        ],
        rows,
    )
}

/// Monthly training stress sums under the first stress column any
/// record carries, searched over [`TSS_COLUMN_CANDIDATES`].
pub fn monthly_tss_table(records: &[ActivityRecord]) -> Result<Table, ReportError> {
    let column = TSS_COLUMN_CANDIDATES
        .iter()
        .copied()
        .find(|name| records.iter().any(|record| record.extras.contains_key(*name)))
        .ok_or(ReportError::TrainingStressUnavailable)?;

    let mut months: BTreeMap<i32, f64> = BTreeMap::new();
    for record in records {
        let sum = months.entry(record.year_month).or_insert(0.0);
        *sum += record.extra_f64(column).unwrap_or(0.0);
    }

    let rows = months
        .into_iter()
        .map(|(year_month, tss)| vec![year_month.to_string(), decimal(tss, 0)])
        .collect();
    Ok(Table::new(&["yrmo", column], rows))
}
