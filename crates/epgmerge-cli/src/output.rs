//! Writing per-channel schedule JSON files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use epgmerge_core::ScheduleRecord;

/// File name for a channel's schedule, derived from its key.
#[must_use]
pub fn schedule_filename(channel_key: &str) -> String {
    format!("{channel_key}.json")
}

/// Writes one channel's schedule record as pretty-printed JSON under
/// `dir`, creating the directory if needed. Returns the written path.
///
/// # Errors
///
/// Returns an error if directory creation, serialization, or the file
/// write fails.
pub fn write_schedule(dir: &Path, channel_key: &str, record: &ScheduleRecord) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    let path = dir.join(schedule_filename(channel_key));
    let json = serde_json::to_string_pretty(record)
        .with_context(|| format!("failed to serialize schedule for {channel_key}"))?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
