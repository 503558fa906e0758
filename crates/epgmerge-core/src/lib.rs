//! Core domain logic for epgmerge.
//!
//! Everything in this crate is pure: the XMLTV time codec, the first-class
//! channel join key, the source-priority merge fold, calendar-day
//! windowing, and schedule record rendering. Feed retrieval and file I/O
//! live in `epgmerge-feed` and the CLI.

/// Merged catalog data model and the source-priority merge fold.
pub mod catalog;
/// Per-feed error taxonomy.
pub mod error;
/// First-class channel join key.
pub mod key;
/// Output record rendering.
pub mod schedule;
/// XMLTV timestamp parsing and output formatting.
pub mod time;
/// Calendar-day partitioning of programme lists.
pub mod window;

pub use catalog::{
    Catalog, Channel, FeedChannel, FeedSource, MergedChannel, ParsedFeed, Programme,
    SourceOutcome, merge_sources,
};
pub use error::{EpgError, EpgResult};
pub use key::channel_key;
pub use schedule::{ScheduleEntry, ScheduleRecord, render_schedule};
pub use time::{format_clock_time, format_long_date, parse_xmltv_time};
pub use window::programmes_for_date;
