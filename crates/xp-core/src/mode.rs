//! Day/night selection mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which experience column applies to every source in one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    #[default]
    Day,
    Night,
}

impl SelectionMode {
    /// Maps a "use night rates" flag to a mode.
    pub const fn from_night(use_night: bool) -> Self {
        if use_night { Self::Night } else { Self::Day }
    }

    pub const fn is_night(self) -> bool {
        matches!(self, Self::Night)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Night => "night",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SelectionMode {
    type Err = UnknownSelectionMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(UnknownSelectionMode(s.to_string())),
        }
    }
}

impl Serialize for SelectionMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SelectionMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown mode strings.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown selection mode: {0} (expected day or night)")]
pub struct UnknownSelectionMode(String);
