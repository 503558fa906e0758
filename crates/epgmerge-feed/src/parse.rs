//! XMLTV document text to `ParsedFeed` normalization.

use epgmerge_core::{EpgError, EpgResult, FeedChannel, ParsedFeed, Programme, parse_xmltv_time};

use crate::xml::TvDocument;

/// Title used when a programme carries no `<title>` element.
const UNKNOWN_SHOW: &str = "Unknown Show";

/// Parses a raw XMLTV document into the normalized per-feed shape.
///
/// Channel display names fall back to the native id, logos to the empty
/// string. Programme start/stop timestamps are converted to target-zone
/// local time. Programmes referencing a channel id with no matching
/// channel element are still recorded under that id.
///
/// # Errors
///
/// - [`EpgError::MalformedFeed`] if the document is not well-formed or a
///   programme lacks the `start`/`stop`/`channel` attributes.
/// - [`EpgError::MissingChannelId`] if any channel element has no `id`.
/// - [`EpgError::MalformedTimestamp`] if a start/stop value does not parse.
pub fn parse_feed(xml: &str) -> EpgResult<ParsedFeed> {
    let document: TvDocument =
        quick_xml::de::from_str(xml).map_err(|e| EpgError::MalformedFeed(e.to_string()))?;

    let mut feed = ParsedFeed::default();

    for channel in document.channels {
        let id = channel.id.ok_or(EpgError::MissingChannelId)?;
        let name = channel
            .display_names
            .iter()
            .find_map(|element| element.text.clone())
            .unwrap_or_else(|| id.clone());
        let logo = channel
            .icons
            .iter()
            .find_map(|icon| icon.src.clone())
            .unwrap_or_default();
        feed.channels.insert(id, FeedChannel { name, logo });
    }

    for programme in document.programmes {
        let show_name = programme
            .titles
            .iter()
            .find_map(|element| element.text.clone())
            .unwrap_or_else(|| String::from(UNKNOWN_SHOW));
        let show_logo = programme
            .icons
            .iter()
            .find_map(|icon| icon.src.clone())
            .unwrap_or_default();

        let entry = Programme {
            show_name,
            start_time: parse_xmltv_time(&programme.start, true)?,
            end_time: parse_xmltv_time(&programme.stop, true)?,
            show_logo,
        };

        feed.programmes
            .entry(programme.channel)
            .or_default()
            .push(entry);
    }

    Ok(feed)
}
