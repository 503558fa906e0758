//! Calendar-day partitioning of programme lists.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::Programme;

/// Selects the programmes belonging to `target_date`, ordered by start.
///
/// A programme starting on the target date is included unmodified. A
/// programme that started the previous day and ends on the target date
/// strictly after midnight is carried over with its start clamped to
/// midnight; the end instant is never altered. Everything else is
/// excluded. The sort is stable, so equal start instants keep their
/// input order, and windowing the same input twice yields identical
/// output.
///
/// Programmes spanning more than one midnight are attributed only to
/// their start day and the single carry-over day; they are not split
/// across further boundaries. Start/end inversion is not validated here.
#[must_use]
pub fn programmes_for_date(programmes: &[Programme], target_date: NaiveDate) -> Vec<Programme> {
    let midnight = target_date.and_time(NaiveTime::MIN);
    let previous_day = target_date.pred_opt();

    let mut window: Vec<Programme> = Vec::new();
    for programme in programmes {
        let start_date = programme.start_time.date();
        let end_date = programme.end_time.date();

        if start_date == target_date {
            window.push(programme.clone());
        } else if previous_day == Some(start_date)
            && end_date == target_date
            && programme.end_time > midnight
        {
            let mut carried = programme.clone();
            carried.start_time = midnight;
            window.push(carried);
        }
    }

    window.sort_by_key(|programme| programme.start_time);
    window
}
