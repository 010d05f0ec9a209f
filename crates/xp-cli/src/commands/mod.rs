//! CLI subcommand implementations.

pub mod level;
pub mod plan;
pub mod table;
pub mod trainers;
pub mod util;
