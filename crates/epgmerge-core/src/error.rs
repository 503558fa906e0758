//! Error taxonomy for per-feed operations.

use thiserror::Error;

/// Errors a single feed can produce between retrieval and parsing.
///
/// Every variant is absorbed at the source-outcome boundary: the failing
/// source is logged with its display name, contributes nothing to the
/// merged catalog, and the run continues with the remaining sources.
#[derive(Error, Debug)]
pub enum EpgError {
    /// Timestamp prefix did not match the `YYYYMMDDHHMMSS` pattern.
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    /// A `<channel>` element has no `id` attribute (fatal per document).
    #[error("channel element is missing its id attribute")]
    MissingChannelId,

    /// Document is not well-formed XMLTV.
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// Retrieval or decompression of the feed failed.
    #[error("feed unavailable: {0}")]
    FeedUnavailable(String),
}

/// Result type alias for per-feed operations.
pub type EpgResult<T> = Result<T, EpgError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_error_messages_name_the_cause() {
        // Arrange
        let errors = [
            EpgError::MalformedTimestamp(String::from("20xx")),
            EpgError::MissingChannelId,
            EpgError::MalformedFeed(String::from("unexpected end of stream")),
            EpgError::FeedUnavailable(String::from("connection refused")),
        ];

        // Act
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();

        // Assert
        assert!(messages[0].contains("malformed timestamp"));
        assert!(messages[1].contains("missing its id attribute"));
        assert!(messages[2].contains("malformed feed"));
        assert!(messages[3].contains("feed unavailable"));
    }
}
