//! Merged catalog data model and the source-priority merge fold.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EpgError;
use crate::key::channel_key;

/// One broadcast slot after timestamp normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Programme {
    /// Show title (`"Unknown Show"` when the feed omits it).
    pub show_name: String,
    /// Start instant in target-zone local time.
    pub start_time: NaiveDateTime,
    /// End instant in target-zone local time. Never validated against
    /// `start_time`; inverted ranges pass through untouched.
    pub end_time: NaiveDateTime,
    /// Programme artwork URL, empty when the feed has none.
    pub show_logo: String,
}

/// Channel fields as declared in one feed, before any source claims it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedChannel {
    /// Display name (falls back to the native id at parse time).
    pub name: String,
    /// Channel logo URL, empty when the feed has none.
    pub logo: String,
}

/// Channel metadata as claimed by the winning source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Display name.
    pub name: String,
    /// Channel logo URL.
    pub logo: String,
    /// Priority of the source that claimed this channel (lower wins).
    pub priority: u32,
    /// Display name of the claiming source.
    pub source: String,
}

/// Normalized output of one feed, keyed by the source-local channel id.
///
/// Programme lists may reference ids with no matching channel element;
/// such orphans survive into the merged catalog keyed by their native id.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    /// Channel declarations keyed by native id.
    pub channels: HashMap<String, FeedChannel>,
    /// Programme lists keyed by native id, in document order (unsorted).
    pub programmes: HashMap<String, Vec<Programme>>,
}

/// Identity of one configured feed source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSource {
    /// Human-readable source name, used in logs and claim records.
    pub name: String,
    /// Fetch URL of the compressed XMLTV document.
    pub url: String,
    /// Priority integer; lower is preferred during the merge.
    pub priority: u32,
}

/// Typed result of retrieving and parsing one source.
///
/// A failed source is not fatal to the run: the caller logs the error with
/// the source display name and this source contributes nothing.
#[derive(Debug)]
pub enum SourceOutcome {
    /// Source fetched and parsed successfully.
    Fetched {
        /// Source display name.
        name: String,
        /// Source priority (lower wins).
        priority: u32,
        /// The parsed feed contribution.
        feed: ParsedFeed,
    },
    /// Retrieval, decompression, or parsing failed.
    Failed {
        /// Source display name.
        name: String,
        /// What went wrong.
        error: EpgError,
    },
}

/// A channel together with the programme list it won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedChannel {
    /// Winning channel record.
    pub channel: Channel,
    /// Full programme list from the winning source (document order).
    pub programmes: Vec<Programme>,
}

/// Immutable result of folding all source outcomes, keyed by channel key.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Merged channels keyed by [`channel_key`] of their display name.
    pub channels: HashMap<String, MergedChannel>,
}

impl Catalog {
    /// Looks up a merged channel by its join key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MergedChannel> {
        self.channels.get(key)
    }

    /// Number of merged channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Returns whether a claim at `priority` may take over an entry that is
/// currently held at `claimed` (absent, or numerically greater).
const fn claim_wins(claimed: Option<u32>, priority: u32) -> bool {
    match claimed {
        None => true,
        Some(held) => priority < held,
    }
}

/// Folds ordered source outcomes into a merged catalog.
///
/// Sources are visited in declaration order. For each channel the join key
/// is [`channel_key`] of its display name; an entry is claimed when absent,
/// and overwritten wholesale (channel record and programme list together)
/// when the current source's priority integer is strictly lower than the
/// stored one. There is no partial merge of programmes across sources.
///
/// Failed outcomes are skipped here; logging them is the caller's job.
#[must_use]
pub fn merge_sources(outcomes: Vec<SourceOutcome>) -> Catalog {
    let mut channels: HashMap<String, MergedChannel> = HashMap::new();

    for outcome in outcomes {
        let SourceOutcome::Fetched {
            name,
            priority,
            feed,
        } = outcome
        else {
            continue;
        };

        let ParsedFeed {
            channels: feed_channels,
            mut programmes,
        } = feed;

        for (native_id, declared) in feed_channels {
            // A declared channel always consumes its programme list, win
            // or lose; only lists with no channel element stay behind as
            // orphans for the loop below.
            let won = programmes.remove(&native_id).unwrap_or_default();
            let key = channel_key(&declared.name);
            let claimed = channels.get(&key).map(|held| held.channel.priority);
            if claim_wins(claimed, priority) {
                channels.insert(
                    key,
                    MergedChannel {
                        channel: Channel {
                            name: declared.name,
                            logo: declared.logo,
                            priority,
                            source: name.clone(),
                        },
                        programmes: won,
                    },
                );
            }
        }

        // Programme lists whose channel id had no channel element still
        // enter the catalog, keyed on the native id itself.
        for (native_id, orphaned) in programmes {
            let key = channel_key(&native_id);
            let claimed = channels.get(&key).map(|held| held.channel.priority);
            if claim_wins(claimed, priority) {
                channels.insert(
                    key,
                    MergedChannel {
                        channel: Channel {
                            name: native_id,
                            logo: String::new(),
                            priority,
                            source: name.clone(),
                        },
                        programmes: orphaned,
                    },
                );
            }
        }
    }

    Catalog { channels }
}
