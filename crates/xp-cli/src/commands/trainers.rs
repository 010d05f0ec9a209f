//! Trainers command: the strongest trainers under the current rates.
//!
//! Use it to find the id to pass as `--highest-gym`.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use xp_core::{SelectionMode, SourceTable};

use super::util::{ModeArgs, SourceArgs, load_table};
use crate::Config;

#[derive(Debug, Clone, Default, Args)]
pub struct TrainersArgs {
    /// Number of trainers to list (default from config).
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Mark this trainer id as the selected highest gym.
    #[arg(long, value_name = "ID")]
    pub highest_gym: Option<u64>,

    /// Output JSON instead of text.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub mode: ModeArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// One listed trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainerRow {
    pub number: u64,
    pub name: String,
    pub level: Option<String>,
    pub exp: u64,
    pub selected: bool,
}

/// Top `limit` trainers by experience per battle, highest first.
pub fn top_trainers(
    table: &SourceTable,
    mode: SelectionMode,
    limit: usize,
    highest_gym: Option<u64>,
) -> Vec<TrainerRow> {
    table
        .ranked(mode)
        .into_iter()
        .take(limit)
        .map(|source| TrainerRow {
            number: source.number,
            name: source.name.clone(),
            level: source.level.clone(),
            exp: source.exp_for(mode),
            selected: highest_gym == Some(source.number),
        })
        .collect()
}

pub fn format_trainers(rows: &[TrainerRow], mode: SelectionMode) -> String {
    let mut output = String::new();
    writeln!(output, "Top {} trainers ({mode} rates):", rows.len()).unwrap();
    let id_width = rows
        .iter()
        .map(|row| row.number.to_string().len())
        .max()
        .unwrap_or_default();
    for row in rows {
        let marker = if row.selected { '*' } else { ' ' };
        let level = row.level.as_deref().unwrap_or("?");
        writeln!(
            output,
            "{marker} {:>id_width$}  {} (level: {level})  {} exp",
            row.number, row.name, row.exp
        )
        .unwrap();
    }
    output
}

pub fn run<W: Write>(writer: &mut W, args: &TrainersArgs, config: &Config) -> Result<()> {
    let mode = args.mode.resolve(Utc::now());
    let table = load_table(&args.source, config)?;
    let rows = top_trainers(
        &table,
        mode,
        args.limit.unwrap_or(config.trainer_limit),
        args.highest_gym,
    );

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write!(writer, "{}", format_trainers(&rows, mode))?;
    }
    Ok(())
}
