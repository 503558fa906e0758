//! XMLTV feed retrieval and parsing for epgmerge.
//!
//! Fetches compressed XMLTV documents over HTTP and normalizes them into
//! the `epgmerge-core` data model. The [`LocalFeedFetch`] trait is the
//! seam for substituting mock transports in tests.

mod client;
mod fetch;
mod gather;
mod parse;
pub(crate) mod xml;

pub use client::{FeedClient, FeedClientBuilder};
pub use fetch::{FeedFetch, LocalFeedFetch};
pub use gather::collect_source_outcomes;
pub use parse::parse_feed;
