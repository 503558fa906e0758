//! The sync pipeline: fetch all sources, merge, filter, write schedules.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use epgmerge_core::{SourceOutcome, merge_sources, programmes_for_date, render_schedule};
use epgmerge_feed::{LocalFeedFetch, collect_source_outcomes};

use crate::config::AppConfig;
use crate::output::write_schedule;

/// Counts and misses from one sync run, for the end-of-run summary.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Channels with at least one programme written for today.
    pub found_today: usize,
    /// Channels with at least one programme written for tomorrow.
    pub found_tomorrow: usize,
    /// Allowlist keys absent from the merged catalog.
    pub not_found: BTreeSet<String>,
    /// Allowlist keys with no schedule file for today, whether missing
    /// from the catalog or merely empty for the day.
    pub missing_today: BTreeSet<String>,
    /// Allowlist keys with no schedule file for tomorrow.
    pub missing_tomorrow: BTreeSet<String>,
}

/// Empties an output directory of schedule files, creating it if needed.
///
/// Only `.json` files are removed, so a shrunken allowlist cannot leave
/// stale schedules from a previous run behind.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove stale {}", path.display()))?;
        }
    }
    Ok(())
}

/// Runs the full sync: downloads every configured source, merges them by
/// priority, and writes one JSON schedule per allowlisted channel per day.
///
/// Both output directories are created (and cleared of schedule files
/// from earlier runs) before any channel is processed. Days with no
/// programmes in window produce no file. Channels missing from the
/// catalog are collected in the report rather than failing the run.
///
/// # Errors
///
/// Returns an error if the date arithmetic overflows, the output
/// directories cannot be prepared, or a schedule file cannot be written.
pub async fn run_sync(
    fetcher: &(impl LocalFeedFetch + Sync),
    config: &AppConfig,
    filter: &BTreeSet<String>,
    today: NaiveDate,
    out_root: &Path,
) -> Result<SyncReport> {
    let outcomes = collect_source_outcomes(fetcher, &config.sources).await;
    for outcome in &outcomes {
        if let SourceOutcome::Failed { name, error } = outcome {
            tracing::error!("Source '{name}' skipped: {error}");
        }
    }

    let catalog = merge_sources(outcomes);
    tracing::info!("Merged catalog holds {} channels", catalog.len());

    let tomorrow = today
        .succ_opt()
        .context("date arithmetic overflow computing tomorrow")?;
    let today_dir = out_root.join(&config.output.today_dir);
    let tomorrow_dir = out_root.join(&config.output.tomorrow_dir);
    prepare_output_dir(&today_dir)?;
    prepare_output_dir(&tomorrow_dir)?;

    let mut report = SyncReport::default();
    let mut written_today: BTreeSet<String> = BTreeSet::new();
    let mut written_tomorrow: BTreeSet<String> = BTreeSet::new();

    for key in filter {
        let Some(merged) = catalog.get(key) else {
            tracing::warn!("Channel '{key}' not found in any source");
            report.not_found.insert(key.clone());
            continue;
        };

        for (date, dir, written) in [
            (today, &today_dir, &mut written_today),
            (tomorrow, &tomorrow_dir, &mut written_tomorrow),
        ] {
            let in_window = programmes_for_date(&merged.programmes, date);
            if in_window.is_empty() {
                continue;
            }
            let record = render_schedule(&merged.channel.name, &in_window, date);
            let path = write_schedule(dir, key, &record)?;
            tracing::info!(
                "Saved {} programmes for '{}' to {}",
                record.schedule.len(),
                merged.channel.name,
                path.display()
            );
            written.insert(key.clone());
        }
    }

    report.found_today = written_today.len();
    report.found_tomorrow = written_tomorrow.len();
    report.missing_today = filter.difference(&written_today).cloned().collect();
    report.missing_tomorrow = filter.difference(&written_tomorrow).cloned().collect();

    Ok(report)
}

/// Logs the end-of-run summary: per-day counts, the sorted keys with no
/// data each day, and any allowlisted channels no source carried.
pub fn log_summary(report: &SyncReport, filter_len: usize) {
    tracing::info!(
        "Today: schedules written for {}/{} channels",
        report.found_today,
        filter_len
    );
    tracing::info!(
        "Tomorrow: schedules written for {}/{} channels",
        report.found_tomorrow,
        filter_len
    );
    if !report.missing_today.is_empty() {
        let missing: Vec<&str> = report.missing_today.iter().map(String::as_str).collect();
        tracing::warn!("No schedule for today: {}", missing.join(", "));
    }
    if !report.missing_tomorrow.is_empty() {
        let missing: Vec<&str> = report.missing_tomorrow.iter().map(String::as_str).collect();
        tracing::warn!("No schedule for tomorrow: {}", missing.join(", "));
    }
    if !report.not_found.is_empty() {
        let missing: Vec<&str> = report.not_found.iter().map(String::as_str).collect();
        tracing::warn!("Channels not found in any source: {}", missing.join(", "));
    }
}
