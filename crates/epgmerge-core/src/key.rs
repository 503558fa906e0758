//! First-class channel join key.
//!
//! Channel ids are source-local, so the true join key across feeds is the
//! display name. `channel_key` computes its normalized form once; merging,
//! allowlist filtering, and output file naming all use the same value.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that are filesystem-hostile or inconsistent across feeds.
#[allow(clippy::expect_used)]
static HOSTILE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("failed to compile key regex"));

/// Normalizes a channel display name into the catalog join key.
///
/// Hostile characters become `-`, surrounding whitespace is trimmed, the
/// result is lowercased and spaces become `-`. Two sources spelling the
/// same channel name identically therefore collide on the same key,
/// which is what drives priority resolution.
#[must_use]
pub fn channel_key(display_name: &str) -> String {
    let cleaned = HOSTILE_CHARS_RE.replace_all(display_name, "-");
    cleaned.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lowercases_and_dashes_spaces() {
        // Arrange & Act & Assert
        assert_eq!(channel_key("Star Plus HD"), "star-plus-hd");
    }

    #[test]
    fn test_key_replaces_hostile_characters() {
        // Arrange & Act & Assert
        assert_eq!(channel_key(r#"Sony SAB?"#), "sony-sab-");
        assert_eq!(channel_key("A/B: C"), "a-b--c");
    }

    #[test]
    fn test_key_trims_before_normalizing() {
        // Arrange & Act & Assert
        assert_eq!(channel_key("  Zee TV  "), "zee-tv");
    }

    #[test]
    fn test_key_is_stable_for_already_normalized_input() {
        // Arrange & Act & Assert
        assert_eq!(channel_key("colors-hd"), "colors-hd");
    }

    #[test]
    fn test_same_name_different_case_collides() {
        // Arrange & Act & Assert
        assert_eq!(channel_key("ZEE Cinema"), channel_key("Zee cinema"));
    }
}
