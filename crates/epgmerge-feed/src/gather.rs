//! Per-source retrieval into typed outcomes.

use epgmerge_core::{FeedSource, SourceOutcome};
use tracing::instrument;

use crate::fetch::LocalFeedFetch;
use crate::parse::parse_feed;

/// Fetches and parses every source sequentially, in declaration order.
///
/// Each source yields a typed [`SourceOutcome`]; a failure is recorded,
/// never propagated, so one broken feed cannot abort the run. All
/// outcomes are collected before any merging happens, which keeps
/// priority resolution independent of retrieval timing.
#[instrument(skip_all)]
pub async fn collect_source_outcomes(
    fetcher: &(impl LocalFeedFetch + Sync),
    sources: &[FeedSource],
) -> Vec<SourceOutcome> {
    let mut outcomes = Vec::with_capacity(sources.len());

    for source in sources {
        tracing::info!(source = %source.name, url = %source.url, "Downloading feed");

        let outcome = match fetcher.fetch_xml(source).await {
            Ok(xml) => match parse_feed(&xml) {
                Ok(feed) => {
                    tracing::info!(
                        source = %source.name,
                        channels = feed.channels.len(),
                        "Feed parsed"
                    );
                    SourceOutcome::Fetched {
                        name: source.name.clone(),
                        priority: source.priority,
                        feed,
                    }
                }
                Err(error) => SourceOutcome::Failed {
                    name: source.name.clone(),
                    error,
                },
            },
            Err(error) => SourceOutcome::Failed {
                name: source.name.clone(),
                error,
            },
        };

        outcomes.push(outcome);
    }

    outcomes
}
