//! epgmerge - multi-source XMLTV schedule merger CLI.

/// Application configuration (TOML).
mod config;
/// Channel allowlist loading.
mod filter;
/// Schedule JSON file output.
mod output;
/// The sync pipeline.
mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path, resolve_filter_path};
use crate::filter::load_filter_list;
use crate::run::{log_summary, run_sync};
use epgmerge_feed::FeedClient;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/filter directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Download, merge, and write per-channel JSON schedules.
    Sync(SyncArgs),
    /// List configured feed sources.
    Sources,
}

/// Arguments for the `sync` subcommand.
#[derive(clap::Args)]
struct SyncArgs {
    /// Reference date treated as "today" (format: 2025-01-05).
    /// Defaults to the current local date.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Root directory receiving the today/tomorrow output folders.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

/// Runs the `sync` subcommand.
///
/// # Errors
///
/// Returns an error if the HTTP client fails to build, config cannot be
/// loaded, or output files cannot be written.
#[instrument(skip_all)]
async fn run_sync_command(args: &SyncArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let filter_path = resolve_filter_path(dir).context("failed to resolve filter path")?;
    let filter = load_filter_list(&filter_path).context("failed to load filter list")?;
    if filter.is_empty() {
        tracing::info!("No channels in filter list. Exiting.");
        return Ok(());
    }
    tracing::info!("Filter list holds {} channels", filter.len());

    let client = FeedClient::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build feed client")?;

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!("Syncing schedules for {today} and the day after");

    let report = run_sync(&client, &config, &filter, today, &args.out_dir).await?;
    log_summary(&report, filter.len());

    Ok(())
}

/// Runs the `sources` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
#[instrument(skip_all)]
fn run_sources_command(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Configured sources ({}):", config.sources.len());
    for source in &config.sources {
        tracing::info!("  [{}] {} - {}", source.priority, source.name, source.url);
    }

    Ok(())
}

/// Entry point.
///
/// Subcommand failures are logged and the process still exits cleanly;
/// the summary log is the error surface, not the exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sync(args) => {
            tokio::select! {
                result = run_sync_command(&args, cli.dir.as_ref()) => result,
                _ = tokio::signal::ctrl_c() => {
                    tracing::warn!("Interrupted by user");
                    Ok(())
                }
            }
        }
        Commands::Sources => run_sources_command(cli.dir.as_ref()),
    };

    if let Err(error) = result {
        tracing::error!("Unexpected failure: {error:#}");
    }
}
