//! # Peerscope Portfolio
//!
//! Snapshot analytics comparing a reference fund with its peer group.
//!
//! This crate provides:
//!
//! - **Enrichment**: joining raw holdings with instrument master data
//! - **Peer selection**: roster-driven selection of one peer set's rows
//! - **Analytics**: overlap, uniqueness, consensus, concentration, profiles
//! - **Benchmarking**: conviction, country/sector allocation, active share
//! - **Bucketing**: market cap classification
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every analytic takes rows and returns new rows
//! - **Degrade, don't fail**: a missing reference fund or empty peer set
//!   produces empty or zero results
//! - **Peer average over all peers**: absent positions count as zero weight
//! - **Deterministic ordering**: stable sorts; ties follow first-seen order
//!
//! ## Example
//!
//! ```rust
//! use peerscope_portfolio::prelude::*;
//!
//! let funds = vec![Fund::reference("Own", "Asia"), Fund::peer("Peer", "Asia")];
//! let holdings = vec![
//!     HoldingRecord::new("Own", "A", 10.0),
//!     HoldingRecord::new("Own", "B", 5.0),
//!     HoldingRecord::new("Peer", "A", 6.0),
//!     HoldingRecord::new("Peer", "C", 4.0),
//! ];
//!
//! let rows = PeerUniverse::new(&funds, "Asia").build(&holdings, &[]);
//! let overlap = holdings_overlap(&rows, &AnalyticsConfig::default());
//! assert_eq!(overlap[0].overlap_count, 1);
//! assert!((overlap[0].jaccard_index - 1.0 / 3.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod analytics;
pub mod benchmark;
pub mod bucketing;
pub mod enrich;
pub mod error;
pub mod types;
pub mod universe;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        concentration_metrics, consensus_holdings, fund_profiles, holdings_overlap,
        peer_overview, unique_positions, ConcentrationRow, ConsensusRow, DistinctHolding,
        FundProfile, FundSummary, MissingConsensus, OverlapRow, PeerOverview, PeerSplit,
        UniquePositions,
    };
    pub use crate::benchmark::{
        active_share, conviction_positions, country_allocation, sector_allocation, ActiveShare,
        AllocationRow, ConvictionRow, CountryAllocation, SectorAllocation,
    };
    pub use crate::bucketing::{market_cap_analysis, CapBucket, MarketCapAnalysis};
    pub use crate::enrich::{annotate, enrich};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::types::AnalyticsConfig;
    pub use crate::universe::{validate_roster, PeerUniverse};

    pub use peerscope_core::prelude::*;
}

// Re-export commonly used types at crate root
pub use error::{PortfolioError, PortfolioResult};
pub use types::AnalyticsConfig;
pub use universe::{validate_roster, PeerUniverse};
