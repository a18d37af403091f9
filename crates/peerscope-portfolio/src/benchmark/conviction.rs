//! Active weights of every ticker versus the peer average.

use crate::analytics::group::{descriptors_by_ticker, weight_by_ticker, Grouped};
use crate::analytics::split::PeerSplit;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Reference weight against the peer-average weight for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvictionRow {
    /// Ticker.
    pub ticker: String,

    /// Short name (backfilled from peers).
    pub short_name: Option<String>,

    /// Reference fund weight (0 when not held).
    pub reference_weight: f64,

    /// Total peer weight divided by the number of peer funds.
    pub peer_avg_weight: f64,

    /// Number of peer funds holding the ticker.
    pub peer_holder_count: usize,

    /// `reference_weight - peer_avg_weight`.
    pub active_weight: f64,

    /// Country (backfilled from peers).
    pub country: Option<String>,

    /// GICS sector (backfilled from peers).
    pub gics_sector: Option<String>,
}

/// Computes active weights over the union of reference and peer tickers.
///
/// Peers that do not hold a ticker count as zero in its average, so the
/// divisor is the number of peer funds, not the number of holders.
/// Sorted by absolute active weight descending; ties keep first-seen order
/// (reference rows, then peer rows).
///
/// Returns an empty vector without a reference fund or without peers.
#[must_use]
pub fn conviction_positions(rows: &[EnrichedHolding]) -> Vec<ConvictionRow> {
    let split = PeerSplit::new(rows);
    if !split.has_reference() || split.num_peers() == 0 {
        debug!(
            has_reference = split.has_reference(),
            num_peers = split.num_peers(),
            "conviction skipped"
        );
        return Vec::new();
    }

    let reference_weights = weight_by_ticker(split.reference());
    let reference_desc = descriptors_by_ticker(split.reference());
    let peer_desc = descriptors_by_ticker(split.peers());

    let mut peer_stats: Grouped<'_, (f64, HashSet<&str>)> = Grouped::new();
    for row in split.peers() {
        let (total, holders) = peer_stats.entry(row.ticker.as_str());
        *total += row.weight;
        holders.insert(row.fund_name.as_str());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let tickers: Vec<&str> = reference_weights
        .keys()
        .chain(peer_stats.keys())
        .filter(|t| seen.insert(*t))
        .collect();

    let mut result: Vec<ConvictionRow> = tickers
        .into_iter()
        .map(|ticker| {
            let reference_weight = reference_weights.get(ticker).copied().unwrap_or(0.0);
            let (peer_total, holders) = peer_stats
                .get(ticker)
                .map_or((0.0, 0), |(total, holders)| (*total, holders.len()));
            let peer_avg_weight = split.peer_average(peer_total);
            let descriptors = reference_desc
                .get(ticker)
                .cloned()
                .unwrap_or_default()
                .or(peer_desc.get(ticker));

            ConvictionRow {
                ticker: ticker.to_string(),
                short_name: descriptors.short_name,
                reference_weight,
                peer_avg_weight,
                peer_holder_count: holders,
                active_weight: reference_weight - peer_avg_weight,
                country: descriptors.country,
                gics_sector: descriptors.gics_sector,
            }
        })
        .collect();

    result.sort_by(|a, b| {
        b.active_weight
            .abs()
            .partial_cmp(&a.active_weight.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(fund: &str, ticker: &str, weight: f64, is_ref: bool) -> EnrichedHolding {
        EnrichedHolding::new(fund, ticker, weight).with_reference(is_ref)
    }

    #[test]
    fn test_peer_average_counts_all_peers() {
        let rows = vec![
            row("Own", "A", 10.0, true),
            row("P1", "A", 6.0, false),
            row("P2", "B", 4.0, false),
        ];
        let result = conviction_positions(&rows);
        let a = result.iter().find(|r| r.ticker == "A").unwrap();
        // 6 / 2 peers, not 6 / 1 holder
        assert_relative_eq!(a.peer_avg_weight, 3.0);
        assert_relative_eq!(a.active_weight, 7.0);
        assert_eq!(a.peer_holder_count, 1);

        let b = result.iter().find(|r| r.ticker == "B").unwrap();
        assert_relative_eq!(b.reference_weight, 0.0);
        assert_relative_eq!(b.active_weight, -2.0);
    }

    #[test]
    fn test_sorted_by_absolute_active_weight() {
        let rows = vec![
            row("Own", "A", 1.0, true),
            row("Own", "B", 2.0, true),
            row("P1", "C", 8.0, false),
        ];
        let tickers: Vec<_> = conviction_positions(&rows)
            .into_iter()
            .map(|r| r.ticker)
            .collect();
        assert_eq!(tickers, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_descriptors_backfilled_from_peers() {
        let rows = vec![
            row("Own", "A", 1.0, true),
            row("P1", "A", 1.0, false)
                .with_short_name("A Co")
                .with_country("India"),
        ];
        let result = conviction_positions(&rows);
        assert_eq!(result[0].short_name.as_deref(), Some("A Co"));
        assert_eq!(result[0].country.as_deref(), Some("India"));
    }

    #[test]
    fn test_degraded_inputs() {
        let only_peers = vec![row("P1", "A", 1.0, false)];
        assert!(conviction_positions(&only_peers).is_empty());

        let only_reference = vec![row("Own", "A", 1.0, true)];
        assert!(conviction_positions(&only_reference).is_empty());
    }
}
