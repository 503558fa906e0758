//! XMLTV timestamp parsing and output formatting.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{EpgError, EpgResult};

/// Offset added when converting feed-native time to the target zone (IST).
const TARGET_ZONE_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// Parses an XMLTV timestamp.
///
/// The input is `YYYYMMDDHHMMSS`, optionally followed by a space and a
/// zone offset token which is ignored. When `apply_offset` is true the
/// fixed target-zone offset (+5:30) is added to the parsed value,
/// converting from the feed's native zone.
///
/// # Errors
///
/// Returns [`EpgError::MalformedTimestamp`] if the fixed-width prefix does
/// not parse as digits matching the expected pattern, or if the offset
/// addition overflows the datetime range.
pub fn parse_xmltv_time(raw: &str, apply_offset: bool) -> EpgResult<NaiveDateTime> {
    let prefix = raw.split_whitespace().next().unwrap_or_default();
    let parsed = NaiveDateTime::parse_from_str(prefix, "%Y%m%d%H%M%S")
        .map_err(|_| EpgError::MalformedTimestamp(raw.to_owned()))?;

    if apply_offset {
        parsed
            .checked_add_signed(Duration::minutes(TARGET_ZONE_OFFSET_MINUTES))
            .ok_or_else(|| EpgError::MalformedTimestamp(raw.to_owned()))
    } else {
        Ok(parsed)
    }
}

/// Renders a 12-hour clock string with no leading zero on the hour and an
/// AM/PM suffix, e.g. `"1:05 PM"`.
#[must_use]
pub fn format_clock_time(instant: &NaiveDateTime) -> String {
    let padded = instant.format("%I:%M %p").to_string();
    padded.trim_start_matches('0').to_owned()
}

/// Renders a long date string, e.g. `"January 05, 2025"`.
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}
