//! Change markers shown next to timeline entries.

use crate::diff::FactChange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an entry changed since the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeMarker {
    /// No marker.
    #[default]
    None,
    /// First appearance in the window.
    New,
    /// Dropped since the previous snapshot.
    Removed,
    /// Back after one snapshot away.
    Returning,
}

impl ChangeMarker {
    /// Picks the marker for a change.
    ///
    /// The first date of a window never carries a marker. Otherwise
    /// returning beats new, which beats removed.
    #[must_use]
    pub fn classify(change: &FactChange, is_first_date: bool) -> Self {
        if is_first_date {
            Self::None
        } else if change.is_returning {
            Self::Returning
        } else if change.is_new {
            Self::New
        } else if change.is_removed {
            Self::Removed
        } else {
            Self::None
        }
    }

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::New => "new",
            Self::Removed => "removed",
            Self::Returning => "returning",
        }
    }
}

impl fmt::Display for ChangeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
