//! Positions that set the reference fund apart from its peers.

use super::group::{sort_by_weight_desc, Descriptors, Grouped};
use super::split::PeerSplit;
use crate::types::AnalyticsConfig;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A reference fund position annotated with how many peers hold it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctHolding {
    /// Ticker.
    pub ticker: String,
    /// Short name.
    pub short_name: Option<String>,
    /// Reference fund weight.
    pub weight: f64,
    /// Number of peer funds holding the ticker.
    pub peer_count: usize,
    /// Country.
    pub country: Option<String>,
    /// GICS sector.
    pub gics_sector: Option<String>,
}

/// A ticker most peers hold but the reference fund does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingConsensus {
    /// Ticker.
    pub ticker: String,
    /// Short name.
    pub short_name: Option<String>,
    /// Number of peer funds holding the ticker.
    pub holder_count: usize,
    /// Mean weight among holding peer rows.
    pub avg_weight: f64,
    /// Country.
    pub country: Option<String>,
    /// GICS sector.
    pub gics_sector: Option<String>,
}

/// Unique, rare and missing-consensus positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniquePositions {
    /// Reference positions no peer holds, by weight descending.
    pub reference_unique: Vec<DistinctHolding>,

    /// Reference positions held by at most `rare_peer_threshold` peers
    /// (unique positions included), by weight descending.
    pub reference_rare: Vec<DistinctHolding>,

    /// Tickers held by at least the consensus threshold of peers and absent
    /// from the reference fund, by holder count descending.
    pub consensus_missing: Vec<MissingConsensus>,
}

#[derive(Default)]
struct PeerHolders<'a> {
    funds: HashSet<&'a str>,
    rows: usize,
    total: f64,
    descriptors: Descriptors,
}

/// Finds unique, rare and missing-consensus positions.
///
/// Returns empty lists when the reference fund has no holdings. With no
/// peers every reference position is unique and nothing is missing.
#[must_use]
pub fn unique_positions(rows: &[EnrichedHolding], config: &AnalyticsConfig) -> UniquePositions {
    let split = PeerSplit::new(rows);
    if !split.has_reference() {
        return UniquePositions::default();
    }

    let mut holders: Grouped<'_, PeerHolders<'_>> = Grouped::new();
    for row in split.peers() {
        let entry = holders.entry(row.ticker.as_str());
        entry.funds.insert(row.fund_name.as_str());
        entry.rows += 1;
        entry.total += row.weight;
        entry.descriptors.fill_from(row);
    }
    let peer_count = |ticker: &str| holders.get(ticker).map_or(0, |h| h.funds.len());

    let mut reference_rare: Vec<DistinctHolding> = split
        .reference()
        .iter()
        .map(|row| DistinctHolding {
            ticker: row.ticker.clone(),
            short_name: row.short_name.clone(),
            weight: row.weight,
            peer_count: peer_count(&row.ticker),
            country: row.country.clone(),
            gics_sector: row.gics_sector.clone(),
        })
        .filter(|h| h.peer_count <= config.rare_peer_threshold)
        .collect();
    sort_by_weight_desc(&mut reference_rare, |h| h.weight);

    let reference_unique: Vec<DistinctHolding> = reference_rare
        .iter()
        .filter(|h| h.peer_count == 0)
        .cloned()
        .collect();

    let reference_tickers: HashSet<&str> = split
        .reference()
        .iter()
        .map(|r| r.ticker.as_str())
        .collect();
    let threshold = config.consensus_threshold(split.num_peers());

    let mut consensus_missing: Vec<MissingConsensus> = holders
        .iter()
        .filter(|(ticker, h)| {
            !reference_tickers.contains(ticker) && h.funds.len() as f64 >= threshold
        })
        .map(|(ticker, h)| MissingConsensus {
            ticker: ticker.to_string(),
            short_name: h.descriptors.short_name.clone(),
            holder_count: h.funds.len(),
            avg_weight: h.total / h.rows as f64,
            country: h.descriptors.country.clone(),
            gics_sector: h.descriptors.gics_sector.clone(),
        })
        .collect();
    consensus_missing.sort_by(|a, b| b.holder_count.cmp(&a.holder_count));

    UniquePositions {
        reference_unique,
        reference_rare,
        consensus_missing,
    }
}
