//! Experience sources and the table they are loaded into.

use serde::{Deserialize, Serialize};

use crate::mode::SelectionMode;

/// Column names carried by tables built from the training-accounts page.
pub const DEFAULT_COLUMNS: [&str; 4] = ["name", "number", "expDay", "expNight"];

/// A battle-able trainer yielding a fixed amount of experience per battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSource {
    /// Display name.
    pub name: String,

    /// Trainer id. Not guaranteed unique across synthetic entries.
    #[serde(default)]
    pub number: u64,

    /// Experience per battle during the day.
    pub exp_day: u64,

    /// Experience per battle at night.
    pub exp_night: u64,

    /// Free-form level label (e.g. "2,500"), when the provider knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl ExperienceSource {
    pub fn new(name: impl Into<String>, number: u64, exp_day: u64, exp_night: u64) -> Self {
        Self {
            name: name.into(),
            number,
            exp_day,
            exp_night,
            level: None,
        }
    }

    /// Sets the level label.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Experience per battle under the given mode.
    pub const fn exp_for(&self, mode: SelectionMode) -> u64 {
        match mode {
            SelectionMode::Day => self.exp_day,
            SelectionMode::Night => self.exp_night,
        }
    }

    /// Key used in an allocation: the name, optionally suffixed with the id.
    pub fn display_key(&self, include_id: bool) -> String {
        if include_id {
            format!("{} ({})", self.name, self.number)
        } else {
            self.name.clone()
        }
    }
}

/// Ordered collection of experience sources.
///
/// Built once by a provider and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    /// Descriptive column list; not enforced.
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,
    pub data: Vec<ExperienceSource>,
}

fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(ToString::to_string).collect()
}

impl Default for SourceTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SourceTable {
    /// Creates a table with the default column list.
    pub fn new(data: Vec<ExperienceSource>) -> Self {
        Self {
            columns: default_columns(),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sources sorted by experience per battle, highest first.
    ///
    /// Equal yields keep table order.
    pub fn ranked(&self, mode: SelectionMode) -> Vec<&ExperienceSource> {
        let mut ranked: Vec<&ExperienceSource> = self.data.iter().collect();
        ranked.sort_by(|a, b| b.exp_for(mode).cmp(&a.exp_for(mode)));
        ranked
    }
}

/// The three-row table used for self-tests.
pub fn sample_table() -> SourceTable {
    SourceTable::new(vec![
        ExperienceSource::new("trainerA", 1, 1, 1),
        ExperienceSource::new("trainerB", 2, 10, 10),
        ExperienceSource::new("trainerC", 3, 100, 100),
    ])
}
