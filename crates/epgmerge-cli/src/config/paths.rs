//! Resolution of config and filter-list file locations.

use std::path::PathBuf;

use anyhow::{Context, Result};

const CONFIG_FILE_NAME: &str = "config.toml";
const FILTER_FILE_NAME: &str = "filter_list.txt";

/// Resolves the config file path.
///
/// If `dir` is given, uses `{dir}/config.toml`. Otherwise falls back to
/// `$HOME/.config/epgmerge/config.toml`.
///
/// # Errors
///
/// Returns an error if no directory was given and `$HOME` is not set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_in_dir(dir, CONFIG_FILE_NAME)
}

/// Resolves the channel filter-list path with the same rules as
/// [`resolve_config_path`].
///
/// # Errors
///
/// Returns an error if no directory was given and `$HOME` is not set.
pub fn resolve_filter_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_in_dir(dir, FILTER_FILE_NAME)
}

fn resolve_in_dir(dir: Option<&PathBuf>, file_name: &str) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(file_name));
    }
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("epgmerge")
        .join(file_name))
}
