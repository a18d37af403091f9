//! # Peerscope History
//!
//! Longitudinal change tracking of fund holdings and sector weights.
//!
//! Facts are recorded per log date; this crate compares consecutive
//! snapshots inside a window of the most recent dates:
//!
//! - **Window**: [`latest_dates`], [`prepare_window`], [`SnapshotWindow`]
//! - **Diff**: [`compute_diffs`] flags new, removed and returning entries
//! - **Presentation**: [`ChangeMarker`] and [`fund_timeline`]
//!
//! The first date of a window is always a baseline with no deltas.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use peerscope_history::prelude::*;
//!
//! let d1 = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let d2 = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
//! let facts = vec![TemporalFact::new(d1, Category::Holdings, "Fund", "X", 5.0)];
//!
//! let changes = compute_diffs(&[d1, d2], &facts);
//! assert_eq!(changes.len(), 2);
//! assert!(changes[1].is_removed);
//! assert_eq!(changes[1].prev_percentage, Some(5.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod diff;
pub mod error;
pub mod marker;
pub mod timeline;
pub mod window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::HistoryConfig;
    pub use crate::diff::{compute_diffs, FactChange};
    pub use crate::error::{HistoryError, HistoryResult};
    pub use crate::marker::ChangeMarker;
    pub use crate::timeline::{fund_timeline, FundTimeline, TimelineEntry, TimelineSection};
    pub use crate::window::{fund_names, latest_dates, prepare_window, SnapshotWindow};

    pub use peerscope_core::{Category, TemporalFact};
}

// Re-export commonly used types at crate root
pub use config::HistoryConfig;
pub use diff::{compute_diffs, FactChange};
pub use error::{HistoryError, HistoryResult};
pub use marker::ChangeMarker;
pub use timeline::{fund_timeline, FundTimeline};
pub use window::{latest_dates, prepare_window, SnapshotWindow};
