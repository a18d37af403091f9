//! Holdings overlap between the reference fund and each peer.

use super::group::{weight_by_ticker, Grouped};
use super::parallel::maybe_parallel_map;
use super::split::PeerSplit;
use crate::types::AnalyticsConfig;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Overlap of one peer fund with the reference fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapRow {
    /// Peer fund name.
    pub fund_name: String,

    /// Number of tickers held by both funds.
    pub overlap_count: usize,

    /// Distinct tickers held by the reference fund.
    pub reference_total: usize,

    /// Distinct tickers held by the peer.
    pub peer_total: usize,

    /// Reference weight in shared tickers.
    pub overlap_weight_reference: f64,

    /// Peer weight in shared tickers.
    pub overlap_weight_peer: f64,

    /// |shared| / |union|, in [0, 1].
    pub jaccard_index: f64,
}

/// Computes overlap between the reference fund and each peer fund.
///
/// Sorted by overlap count descending; ties keep fund-name order.
/// Returns an empty vector when the reference fund has no holdings.
#[must_use]
pub fn holdings_overlap(rows: &[EnrichedHolding], config: &AnalyticsConfig) -> Vec<OverlapRow> {
    let split = PeerSplit::new(rows);
    if !split.has_reference() {
        return Vec::new();
    }

    let reference_weights = weight_by_ticker(split.reference());
    let groups = split.peer_groups();

    let mut result = maybe_parallel_map(&groups, config, |(fund, peer_rows)| {
        overlap_row(fund, &reference_weights, peer_rows)
    });
    result.sort_by(|a, b| b.overlap_count.cmp(&a.overlap_count));
    result
}

fn overlap_row(
    fund: &str,
    reference_weights: &Grouped<'_, f64>,
    peer_rows: &[&EnrichedHolding],
) -> OverlapRow {
    let peer_weights = weight_by_ticker(peer_rows);

    let shared: Vec<&str> = peer_weights
        .keys()
        .filter(|t| reference_weights.contains(t))
        .collect();
    let union: HashSet<&str> = reference_weights.keys().chain(peer_weights.keys()).collect();

    let overlap_weight_reference: f64 = shared
        .iter()
        .filter_map(|t| reference_weights.get(t))
        .sum();
    let overlap_weight_peer: f64 = shared.iter().filter_map(|t| peer_weights.get(t)).sum();

    OverlapRow {
        fund_name: fund.to_string(),
        overlap_count: shared.len(),
        reference_total: reference_weights.len(),
        peer_total: peer_weights.len(),
        overlap_weight_reference,
        overlap_weight_peer,
        jaccard_index: if union.is_empty() {
            0.0
        } else {
            shared.len() as f64 / union.len() as f64
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(fund: &str, ticker: &str, weight: f64, is_ref: bool) -> EnrichedHolding {
        EnrichedHolding::new(fund, ticker, weight).with_reference(is_ref)
    }

    #[test]
    fn test_basic_overlap() {
        let rows = vec![
            row("Own", "A", 10.0, true),
            row("Own", "B", 5.0, true),
            row("P", "A", 6.0, false),
            row("P", "C", 4.0, false),
        ];
        let result = holdings_overlap(&rows, &AnalyticsConfig::default());
        assert_eq!(result.len(), 1);
        let p = &result[0];
        assert_eq!(p.overlap_count, 1);
        assert_eq!(p.reference_total, 2);
        assert_eq!(p.peer_total, 2);
        assert_relative_eq!(p.jaccard_index, 1.0 / 3.0);
        assert_relative_eq!(p.overlap_weight_reference, 10.0);
        assert_relative_eq!(p.overlap_weight_peer, 6.0);
    }

    #[test]
    fn test_identical_sets_have_jaccard_one() {
        let rows = vec![
            row("Own", "A", 10.0, true),
            row("Own", "B", 5.0, true),
            row("P", "B", 1.0, false),
            row("P", "A", 2.0, false),
        ];
        let result = holdings_overlap(&rows, &AnalyticsConfig::default());
        assert_relative_eq!(result[0].jaccard_index, 1.0);
    }

    #[test]
    fn test_sorted_by_overlap_count() {
        let rows = vec![
            row("Own", "A", 1.0, true),
            row("Own", "B", 1.0, true),
            row("P1", "A", 1.0, false),
            row("P2", "A", 1.0, false),
            row("P2", "B", 1.0, false),
            row("P3", "Z", 1.0, false),
        ];
        let result = holdings_overlap(&rows, &AnalyticsConfig::default());
        let names: Vec<_> = result.iter().map(|r| r.fund_name.as_str()).collect();
        assert_eq!(names, vec!["P2", "P1", "P3"]);
        assert_eq!(result[2].overlap_count, 0);
        assert_eq!(result[2].jaccard_index, 0.0);
    }

    #[test]
    fn test_empty_reference() {
        let rows = vec![row("P", "A", 1.0, false)];
        assert!(holdings_overlap(&rows, &AnalyticsConfig::default()).is_empty());
    }

    #[test]
    fn test_duplicate_tickers_summed() {
        let rows = vec![
            row("Own", "A", 2.0, true),
            row("Own", "A", 3.0, true),
            row("P", "A", 1.0, false),
        ];
        let result = holdings_overlap(&rows, &AnalyticsConfig::default());
        assert_relative_eq!(result[0].overlap_weight_reference, 5.0);
        assert_eq!(result[0].reference_total, 1);
    }
}
