//! Application configuration module.
//!
//! Manages the TOML config file holding the ordered feed source list and
//! output directory names, plus path resolution for the config directory.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, OutputConfig};
pub use paths::{resolve_config_path, resolve_filter_path};
