//! Plan command: battles needed to reach a target experience.
//!
//! Implements `xp plan`. Inputs come from flags, a share query string, or
//! both (flags win). The result lists trainers in selection order with
//! their battle counts, followed by any experience the greedy pass could
//! not cover and a share link for the same inputs.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use xp_core::{
    Allocation, SelectOptions, SelectionMode, ShareState, SourceTable, level_for_experience,
    perfect_experience_for, select, summarize,
};

use super::util::{ModeArgs, SourceArgs, load_table};
use crate::Config;

#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Current experience.
    #[arg(long, value_name = "EXP")]
    pub current: Option<u64>,

    /// Target experience.
    #[arg(long, value_name = "EXP", conflicts_with = "level")]
    pub desired: Option<u64>,

    /// Target level; aims for the highest experience still at that level.
    #[arg(long)]
    pub level: Option<u64>,

    /// With --level, aim for the lowest experience of the level instead.
    #[arg(long, requires = "level")]
    pub floor: bool,

    /// Id of the strongest trainer you can beat; stronger ones are skipped.
    #[arg(long, value_name = "ID")]
    pub highest_gym: Option<u64>,

    /// Restore inputs from a share link query (e.g. "?currentExp=1&desiredExp=103").
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Key results by trainer name only, without the id suffix.
    #[arg(long)]
    pub no_id: bool,

    /// Output JSON instead of text.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub mode: ModeArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Resolved plan inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanInputs {
    pub current_exp: u64,
    pub desired_exp: u64,
    pub highest_gym: Option<u64>,
}

impl PlanArgs {
    /// Merges flags over the share query.
    pub fn inputs(&self) -> Result<PlanInputs> {
        let shared = self
            .query
            .as_deref()
            .map(ShareState::parse)
            .unwrap_or_default();

        let desired = self
            .level
            .map(|level| perfect_experience_for(level, !self.floor))
            .or(self.desired)
            .or(shared.desired_exp);

        let Some(current_exp) = self.current.or(shared.current_exp) else {
            bail!("missing current experience (use --current or --query)");
        };
        let Some(desired_exp) = desired else {
            bail!("missing target (use --desired, --level or --query)");
        };

        Ok(PlanInputs {
            current_exp,
            desired_exp,
            highest_gym: self.highest_gym.or(shared.highest_gym),
        })
    }
}

/// Computed plan.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub mode: SelectionMode,
    pub current_exp: u64,
    pub desired_exp: u64,
    pub current_level: u64,
    pub target_level: u64,
    pub gap: u64,
    pub gained: u64,
    pub remaining: u64,
    pub battles: u64,
    pub trainers: Allocation,
    pub share: String,
}

/// Runs the selector over `table` and collects everything the output needs.
pub fn build_report(
    inputs: PlanInputs,
    table: &SourceTable,
    mode: SelectionMode,
    include_id: bool,
) -> PlanReport {
    let options = SelectOptions {
        mode,
        include_id,
        lower_bound: inputs.highest_gym,
    };
    let trainers = select(inputs.current_exp, inputs.desired_exp, table, &options);
    let summary = summarize(inputs.current_exp, inputs.desired_exp, &trainers);
    let share = ShareState {
        current_exp: Some(inputs.current_exp),
        desired_exp: Some(inputs.desired_exp),
        highest_gym: inputs.highest_gym,
    };

    PlanReport {
        mode,
        current_exp: inputs.current_exp,
        desired_exp: inputs.desired_exp,
        current_level: level_for_experience(inputs.current_exp),
        target_level: level_for_experience(inputs.desired_exp),
        gap: summary.gap,
        gained: summary.gained,
        remaining: summary.remaining,
        battles: summary.battles,
        trainers,
        share: format!("?{}", share.to_query()),
    }
}

/// Formats a plan as human-readable text.
pub fn format_plan(report: &PlanReport) -> String {
    let mut output = String::new();

    writeln!(output, "Mode: {}", report.mode).unwrap();
    writeln!(
        output,
        "Experience: {} (level {}) -> {} (level {})",
        report.current_exp, report.current_level, report.desired_exp, report.target_level
    )
    .unwrap();
    writeln!(output, "Gap: {}", report.gap).unwrap();
    writeln!(output).unwrap();

    if report.trainers.is_empty() {
        writeln!(output, "No battles selected.").unwrap();
    } else {
        let width = report
            .trainers
            .keys()
            .map(|key| key.chars().count())
            .chain(std::iter::once("Trainer".len()))
            .max()
            .unwrap_or_default();
        writeln!(output, "{:<width$}  Battles", "Trainer").unwrap();
        for entry in &report.trainers {
            writeln!(output, "{:<width$}  {:>7}", entry.key, entry.battles).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "Gained: {} in {} battles", report.gained, report.battles).unwrap();
    writeln!(output, "Remaining: {}", report.remaining).unwrap();
    write!(output, "Share: {}", report.share).unwrap();

    output
}

pub fn run<W: Write>(writer: &mut W, args: &PlanArgs, config: &Config) -> Result<()> {
    let inputs = args.inputs()?;
    let mode = args.mode.resolve(Utc::now());
    tracing::debug!(?inputs, %mode, "planning");

    let table = load_table(&args.source, config)?;
    let report = build_report(inputs, &table, mode, !args.no_id);

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(writer, "{}", format_plan(&report))?;
    }
    Ok(())
}
