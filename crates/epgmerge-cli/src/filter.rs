//! Channel allowlist loading.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Loads the channel allowlist from a plain-text file, one channel key
/// per line. Lines are trimmed and lowercased; blank lines are skipped.
///
/// A missing file is not an error: a warning is logged and an empty set
/// is returned, which callers treat as "nothing to do".
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_filter_list(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        tracing::warn!("Filter list not found at {}", path.display());
        return Ok(BTreeSet::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}
