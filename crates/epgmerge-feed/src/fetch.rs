//! `FeedFetch` trait definition.
#![allow(clippy::future_not_send)]

use epgmerge_core::{EpgResult, FeedSource};

/// Feed retrieval abstraction.
///
/// Abstracts transport for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FeedFetch: Send)]
pub trait LocalFeedFetch {
    /// Retrieves one source's XMLTV document as decompressed text.
    ///
    /// # Errors
    ///
    /// Returns [`epgmerge_core::EpgError::FeedUnavailable`] if the HTTP
    /// request or decompression fails after all retries.
    async fn fetch_xml(&self, source: &FeedSource) -> EpgResult<String>;
}
