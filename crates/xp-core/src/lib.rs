//! Core domain logic for the experience planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Selection: greedy battle counts that close an experience gap
//! - Levels: the cubic experience curve
//! - Daytime: which rate column applies at a given moment
//! - Sharing: the query-string form of a plan's inputs

pub mod daytime;
pub mod level;
mod mode;
mod selector;
pub mod share;
mod source;

pub use daytime::{is_eastern_daytime, mode_at};
pub use level::{level_for_experience, perfect_experience_for};
pub use mode::{SelectionMode, UnknownSelectionMode};
pub use selector::{
    Allocation, AllocationEntry, SelectOptions, SelectionSummary, select, summarize,
};
pub use share::ShareState;
pub use source::{DEFAULT_COLUMNS, ExperienceSource, SourceTable, sample_table};
