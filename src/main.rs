//! RideLog - Cycling Activity History and Training Load
//!
//! Main entry point: ingest pending FIT files, fold them into the
//! persisted history, then print the report tables.

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use ridelog::activity::{decode_file, normalize_sessions, ActivityRecord};
use ridelog::aggregates::{
    annual_totals, daily_totals, month_totals, month_weekly_summary, monthly_totals, recent_rides,
    weekly_totals, RecentWindow,
};
use ridelog::report::{
    annual_table, daily_table, latest_ride_table, month_summary_table, monthly_table,
    monthly_tss_table, recent_rides_table, weekly_table,
};
use ridelog::storage::{history, load_config, pending_fit_files, AppConfig};
use ridelog::timeline::{build_timeline, calendar_grid, current_month_span, Timeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RideLog v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("loading configuration")?;
    let zone = config.reference_zone();
    let today = Utc::now().with_timezone(&zone).date_naive();

    let new_records = ingest_pending(&config);
    let store = history::load_latest(&config.data_dir).context("loading ride history")?;
    let merged = store.merge(&new_records);
    if merged.len() != store.len() && !merged.is_empty() {
        history::save(&merged, &config.data_dir).context("writing ride history")?;
    } else {
        tracing::info!("No new records, history unchanged at {} rides", store.len());
    }

    let (span_start, span_end) = merged.reporting_span(today);
    tracing::info!("Data range: {} to {}", span_start, span_end);

    let full_timeline = build_timeline(&calendar_grid(span_start, span_end), merged.records());
    let (month_start, month_end) = current_month_span(today);
    let month_timeline = build_timeline(&calendar_grid(month_start, month_end), merged.records());

    print_report(
        &full_timeline,
        &month_timeline,
        merged.records(),
        today,
        config.recent_window_days,
    );
    Ok(())
}

/// Decode and normalize every pending file; a bad file is logged and
/// skipped, the batch continues.
fn ingest_pending(config: &AppConfig) -> Vec<ActivityRecord> {
    let paths = pending_fit_files(&config.import_dir);
    tracing::info!("Found {} pending files in {:?}", paths.len(), config.import_dir);

    let mut records = Vec::new();
    for path in paths {
        match decode_file(&path) {
            Ok(sessions) => {
                tracing::debug!("Decoded {} sessions from {:?}", sessions.len(), path);
                records.extend(normalize_sessions(&sessions, config.reference_zone()));
            }
            Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
        }
    }
    tracing::info!("Normalized {} new records", records.len());
    records
}

fn print_report(
    full_timeline: &Timeline,
    month_timeline: &Timeline,
    records: &[ActivityRecord],
    today: NaiveDate,
    recent_days: i64,
) {
    println!("\n== Latest Ride ==");
    match latest_ride_table(full_timeline) {
        Ok(table) => print!("{}", table.render()),
        Err(e) => println!("{}", e),
    }

    println!("\n== Current Month Rides ==");
    let month_rides = recent_rides(month_timeline, RecentWindow::CurrentMonth, today);
    print!("{}", recent_rides_table(&month_rides).render());

    println!("\n== Rides in the Last {} Days ==", recent_days);
    let trailing = recent_rides(full_timeline, RecentWindow::TrailingDays(recent_days), today);
    print!("{}", recent_rides_table(&trailing).render());

    let month_name = today.format("%B %Y");
    let weeks = month_weekly_summary(records, today);
    if weeks.is_empty() {
        println!("\nNo rides found for {}", month_name);
    } else {
        println!("\n== Weekly Breakdown for {} (includes overlapping weeks) ==", month_name);
        print!(
            "{}",
            month_summary_table(&weeks, &month_totals(&weeks)).render()
        );
    }

    println!("\n== Weekly Totals ==");
    print!("{}", weekly_table(&weekly_totals(full_timeline, None)).render());

    println!("\n== Monthly Totals ==");
    print!("{}", monthly_table(&monthly_totals(full_timeline)).render());

    println!("\n== Annual Totals ==");
    print!("{}", annual_table(&annual_totals(full_timeline)).render());

    println!("\n== Daily Totals ==");
    print!("{}", daily_table(&daily_totals(full_timeline)).render());

    println!("\n== Monthly Training Stress ==");
    match monthly_tss_table(records) {
        Ok(table) => print!("{}", table.render()),
        Err(e) => println!("{}", e),
    }

    if let Some(ctl) = full_timeline.rows.last().and_then(|row| row.ctl) {
        println!("\nChronic training load: {:.1}", ctl);
    }
}
