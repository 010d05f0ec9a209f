//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::plan::PlanArgs;
use crate::commands::trainers::TrainersArgs;
use crate::commands::util::SourceArgs;

/// Training-account experience planner.
///
/// Works out how many battles against which training accounts move a
/// Pokemon from its current experience to a target without overshooting.
#[derive(Debug, Parser)]
#[command(name = "xp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Plan battles to reach a target experience.
    Plan(PlanArgs),

    /// List the strongest trainers for the current rates.
    Trainers(TrainersArgs),

    /// Print the perfect experience value for a level.
    Level {
        /// Target level.
        level: u64,

        /// Use the lowest experience of the level instead of the highest.
        #[arg(long)]
        floor: bool,
    },

    /// Dump the trainer table.
    Table {
        #[command(flatten)]
        source: SourceArgs,

        /// Output JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
