//! Output record rendering.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Programme;
use crate::time::{format_clock_time, format_long_date};

/// One rendered programme row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Show title.
    pub show_name: String,
    /// Formatted start time, e.g. `"7:00 AM"`.
    pub start_time: String,
    /// Formatted end time.
    pub end_time: String,
    /// Programme artwork URL, possibly empty.
    pub show_logo: String,
}

/// Per-channel, per-day output record.
///
/// The channel logo is deliberately not part of the record; the pipeline
/// accepts it but the output format never carried it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleRecord {
    /// Channel display name.
    pub channel_name: String,
    /// Formatted target date, e.g. `"January 05, 2025"`.
    pub date: String,
    /// Rendered programme rows in window order.
    pub schedule: Vec<ScheduleEntry>,
}

/// Renders a windowed programme list into the output record shape.
///
/// Pure transformation; writing the record to disk (and skipping empty
/// windows) is the caller's responsibility.
#[must_use]
pub fn render_schedule(
    channel_name: &str,
    programmes: &[Programme],
    target_date: NaiveDate,
) -> ScheduleRecord {
    ScheduleRecord {
        channel_name: channel_name.to_owned(),
        date: format_long_date(target_date),
        schedule: programmes
            .iter()
            .map(|programme| ScheduleEntry {
                show_name: programme.show_name.clone(),
                start_time: format_clock_time(&programme.start_time),
                end_time: format_clock_time(&programme.end_time),
                show_logo: programme.show_logo.clone(),
            })
            .collect(),
    }
}
