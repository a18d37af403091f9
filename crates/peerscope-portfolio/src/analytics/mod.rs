//! Snapshot analytics comparing the reference fund with its peers.
//!
//! Every function takes the enriched, flagged rows of one peer set (see
//! [`crate::PeerUniverse`]) and returns freshly built result rows. A missing
//! reference fund or an empty peer set yields empty or zero results.
//!
//! - [`holdings_overlap`]: shared tickers and Jaccard index per peer
//! - [`unique_positions`]: unique, rare and missing-consensus positions
//! - [`consensus_holdings`]: holder counts across all funds
//! - [`concentration_metrics`]: top-N weights, HHI, effective positions
//! - [`fund_profiles`]: top holdings with sector and country breakdowns
//! - [`peer_overview`]: headline metrics and per-fund summary

pub(crate) mod group;
pub mod parallel;
pub mod split;

mod concentration;
mod consensus;
mod overlap;
mod overview;
mod profile;
mod uniqueness;

pub use concentration::{concentration_metrics, herfindahl, ConcentrationRow};
pub use consensus::{consensus_holdings, ConsensusRow};
pub use overlap::{holdings_overlap, OverlapRow};
pub use overview::{peer_overview, FundSummary, PeerOverview};
pub use parallel::maybe_parallel_map;
pub use profile::{fund_profiles, FundProfile, ProfileHolding, WeightedItem};
pub use split::PeerSplit;
pub use uniqueness::{unique_positions, DistinctHolding, MissingConsensus, UniquePositions};

/// Rounds half away from zero to `dp` decimal places.
pub(crate) fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

/// Scales weights so they sum to 100.
///
/// Weights are returned unchanged when they sum to 0 or less.
pub(crate) fn normalize_to_100(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w = *w / total * 100.0;
        }
    }
}
