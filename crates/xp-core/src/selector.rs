//! Greedy trainer selection.
//!
//! Closes an experience gap by battling the highest-yield trainers first.
//!
//! # Algorithm Summary
//!
//! 1. Drop every source whose single battle would overshoot the gap
//! 2. Stable-sort the rest by yield, highest first
//! 3. Optionally cut everything ranked above a lower-bound trainer
//! 4. Walk the candidates, taking as many battles of each as fit
//!
//! This is a heuristic. Taking the largest yield first can strand a remainder
//! that a different mix of smaller yields would have closed exactly, and it
//! does not minimise the battle count in general. Callers read the residual
//! from [`SelectionSummary`].

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::mode::SelectionMode;
use crate::source::{ExperienceSource, SourceTable};

/// Knobs for [`select`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Which experience column to use.
    pub mode: SelectionMode,

    /// Suffix every key with the trainer id, e.g. `"name (42)"`.
    pub include_id: bool,

    /// Id of the strongest trainer the player is willing to battle.
    /// Candidates ranked above it are discarded; an unknown id changes nothing.
    pub lower_bound: Option<u64>,
}

/// One row of an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationEntry {
    pub key: String,
    pub battles: u64,
    pub exp_per_battle: u64,
}

impl AllocationEntry {
    pub const fn exp(&self) -> u64 {
        self.battles.saturating_mul(self.exp_per_battle)
    }
}

/// Battle counts keyed by display name, in selection order.
///
/// Re-inserting a key replaces its count in place. Two trainers sharing a
/// name collapse into one row unless ids are included in the keys. The
/// experience and battle totals still count every insert, so they describe
/// the whole greedy pass even when a row was overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    entries: Vec<AllocationEntry>,
    gained: u64,
    battles: u64,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `battles` under `key`, overwriting any existing row.
    pub fn insert(&mut self, key: String, battles: u64, exp_per_battle: u64) {
        self.gained = self
            .gained
            .saturating_add(battles.saturating_mul(exp_per_battle));
        self.battles = self.battles.saturating_add(battles);
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) {
            entry.battles = battles;
            entry.exp_per_battle = exp_per_battle;
        } else {
            self.entries.push(AllocationEntry {
                key,
                battles,
                exp_per_battle,
            });
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.battles)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in selection order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Total experience covered by every recorded insert, overwritten rows included.
    pub const fn gained(&self) -> u64 {
        self.gained
    }

    /// Total number of battles, overwritten rows included.
    pub const fn battles(&self) -> u64 {
        self.battles
    }
}

impl<'a> IntoIterator for &'a Allocation {
    type Item = &'a AllocationEntry;
    type IntoIter = std::slice::Iter<'a, AllocationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialises as a `{key: battles}` object in selection order.
impl Serialize for Allocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.battles)?;
        }
        map.end()
    }
}

/// Experience still missing after greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub gap: u64,
    pub gained: u64,
    pub remaining: u64,
    pub battles: u64,
}

/// Summarises an allocation against the requested range.
pub fn summarize(current_exp: u64, desired_exp: u64, allocation: &Allocation) -> SelectionSummary {
    let gap = desired_exp.saturating_sub(current_exp);
    let gained = allocation.gained();
    SelectionSummary {
        gap,
        gained,
        remaining: gap.saturating_sub(gained),
        battles: allocation.battles(),
    }
}

/// Picks battle counts that move `current_exp` towards `desired_exp`.
///
/// Never overshoots: the experience of the returned allocation is at most
/// `desired_exp - current_exp`. An empty or negative gap yields an empty
/// allocation. Numeric fields of `table` are trusted as-is.
pub fn select(
    current_exp: u64,
    desired_exp: u64,
    table: &SourceTable,
    options: &SelectOptions,
) -> Allocation {
    let mut allocation = Allocation::new();
    let Some(gap) = desired_exp.checked_sub(current_exp).filter(|gap| *gap > 0) else {
        return allocation;
    };
    let mode = options.mode;

    let mut candidates: Vec<&ExperienceSource> = table
        .data
        .iter()
        .filter(|source| source.exp_for(mode) <= gap)
        .collect();
    // `sort_by` is stable; equal yields keep table order.
    candidates.sort_by(|a, b| b.exp_for(mode).cmp(&a.exp_for(mode)));

    if let Some(bound) = options.lower_bound {
        match candidates.iter().position(|source| source.number == bound) {
            Some(index) => {
                candidates.drain(..index);
            }
            None => tracing::debug!(bound, "lower bound not among candidates, ignoring"),
        }
    }

    let mut remaining = gap;
    for source in candidates {
        let exp = source.exp_for(mode);
        if exp == 0 || exp > remaining {
            continue;
        }
        let battles = remaining / exp;
        if battles > 0 {
            allocation.insert(source.display_key(options.include_id), battles, exp);
            remaining -= battles * exp;
        }
        if remaining == 0 {
            break;
        }
    }

    tracing::debug!(
        gap,
        remaining,
        rows = allocation.len(),
        %mode,
        "selected trainers"
    );
    allocation
}
