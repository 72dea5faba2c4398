use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Hard ceiling on the number of probes a single search may make.
pub const MAX_PROBES: usize = 10_000;

/// The result of a binary search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// The search settled on this index.
    Found(usize),
    /// The window closed without a match, or the input was empty.
    NotFound,
    /// The probe budget ran out before the window closed. Only a comparator
    /// that is inconsistent with the sequence can get here.
    Exhausted { probes: usize },
}

impl SearchOutcome {
    /// The index found, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            SearchOutcome::Found(index) => Some(index),
            _ => None,
        }
    }

    /// Returns `true` for [`SearchOutcome::Found`].
    pub fn is_found(self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// Returns `false` only when the probe budget ran out.
    pub fn is_conclusive(self) -> bool {
        !matches!(self, SearchOutcome::Exhausted { .. })
    }

    /// The index, or `-1` for both kinds of miss.
    pub fn legacy_index(self) -> isize {
        match self {
            SearchOutcome::Found(index) => isize::try_from(index).unwrap_or(-1),
            _ => -1,
        }
    }
}

/// Which neighbour to return when a nearest-value search lands strictly
/// between two adjacent entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidePreference {
    /// The entry sorting before the target.
    Before,
    /// The entry sorting after the target.
    #[default]
    After,
}

impl fmt::Display for SidePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SidePreference::Before => f.write_str("before"),
            SidePreference::After => f.write_str("after"),
        }
    }
}

impl FromStr for SidePreference {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(SidePreference::Before),
            "after" => Ok(SidePreference::After),
            other => Err(SearchError::InvalidSide(other.to_string())),
        }
    }
}
