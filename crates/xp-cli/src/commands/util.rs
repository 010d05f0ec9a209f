//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use xp_core::{SelectionMode, SourceTable, mode_at};
use xp_wiki::WikiClient;

use crate::Config;

/// Where the trainer table comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Read the trainer table from a JSON file instead of the wiki.
    #[arg(long, value_name = "PATH")]
    pub table: Option<PathBuf>,
}

/// Day/night override flags.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ModeArgs {
    /// Use day rates regardless of the time in New York.
    #[arg(long, conflicts_with = "night")]
    pub day: bool,

    /// Use night rates regardless of the time in New York.
    #[arg(long)]
    pub night: bool,
}

impl ModeArgs {
    /// Flag override, or the rates in effect at `now`.
    pub fn resolve(self, now: DateTime<Utc>) -> SelectionMode {
        if self.day {
            SelectionMode::Day
        } else if self.night {
            SelectionMode::Night
        } else {
            mode_at(now)
        }
    }
}

/// Loads the trainer table from a file or, failing that, the wiki.
pub fn load_table(source: &SourceArgs, config: &Config) -> Result<SourceTable> {
    if let Some(path) = source.table.as_ref().or(config.table_path.as_ref()) {
        return read_table_file(path);
    }

    let client = WikiClient::new(
        config.wiki_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("failed to create wiki client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    runtime
        .block_on(client.fetch_table())
        .with_context(|| format!("failed to load trainers from {}", client.url()))
}

fn read_table_file(path: &Path) -> Result<SourceTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let table: SourceTable = serde_json::from_str(&content)
        .with_context(|| format!("invalid trainer table in {}", path.display()))?;
    tracing::debug!(rows = table.len(), path = %path.display(), "loaded trainer table file");
    Ok(table)
}
