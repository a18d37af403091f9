//! Active share against the peer consensus and against each peer.

use crate::analytics::group::{descriptors_by_ticker, sort_by_weight_desc, weight_by_ticker, Grouped};
use crate::analytics::parallel::maybe_parallel_map;
use crate::analytics::split::PeerSplit;
use crate::analytics::{normalize_to_100, round_to};
use crate::types::AnalyticsConfig;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Active share of the reference fund against one peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerActiveShare {
    /// Peer fund name.
    pub fund_name: String,
    /// Active share in [0, 100] (1 decimal).
    pub active_share: f64,
}

/// One ticker's contribution to active share versus the consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveShareContributor {
    /// Ticker.
    pub ticker: String,
    /// Short name.
    pub short_name: Option<String>,
    /// Reference weight normalized to 100.
    pub reference_weight: f64,
    /// Consensus weight normalized to 100.
    pub consensus_weight: f64,
    /// Absolute weight difference.
    pub contribution: f64,
}

/// Active share result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveShare {
    /// Active share versus the consensus portfolio (1 decimal).
    pub vs_consensus: f64,
    /// Active share versus each peer, ascending.
    pub vs_each_peer: Vec<PeerActiveShare>,
    /// Largest contributors to `vs_consensus`.
    pub top_contributors: Vec<ActiveShareContributor>,
}

/// Computes active share of the reference fund.
///
/// Reference weights and the consensus portfolio (peer total per ticker
/// divided by the number of peers) are each normalized to 100; weights that
/// sum to zero are used as they are. Active share is half the summed absolute
/// difference over the union of tickers.
///
/// Returns the zero-valued default without a reference fund or without peers.
#[must_use]
pub fn active_share(rows: &[EnrichedHolding], config: &AnalyticsConfig) -> ActiveShare {
    let split = PeerSplit::new(rows);
    if !split.has_reference() || split.num_peers() == 0 {
        debug!(
            has_reference = split.has_reference(),
            num_peers = split.num_peers(),
            "active share skipped"
        );
        return ActiveShare::default();
    }

    let mut reference = weight_by_ticker(split.reference());
    normalize_to_100(reference.values_mut());

    let mut consensus = weight_by_ticker(split.peers());
    for w in consensus.values_mut() {
        *w = split.peer_average(*w);
    }
    normalize_to_100(consensus.values_mut());

    let all: Vec<&EnrichedHolding> = rows.iter().collect();
    let descriptors = descriptors_by_ticker(&all);

    let mut contributors: Vec<ActiveShareContributor> = union(&reference, &consensus)
        .into_iter()
        .map(|ticker| {
            let reference_weight = reference.get(ticker).copied().unwrap_or(0.0);
            let consensus_weight = consensus.get(ticker).copied().unwrap_or(0.0);
            ActiveShareContributor {
                ticker: ticker.to_string(),
                short_name: descriptors.get(ticker).and_then(|d| d.short_name.clone()),
                reference_weight,
                consensus_weight,
                contribution: (reference_weight - consensus_weight).abs(),
            }
        })
        .collect();
    let vs_consensus = contributors.iter().map(|c| c.contribution).sum::<f64>() / 2.0;
    sort_by_weight_desc(&mut contributors, |c| c.contribution);
    contributors.truncate(config.top_contributors);

    let groups = split.peer_groups();
    let mut vs_each_peer = maybe_parallel_map(&groups, config, |(fund, peer_rows)| {
        let mut peer = weight_by_ticker(peer_rows);
        normalize_to_100(peer.values_mut());
        PeerActiveShare {
            fund_name: fund.to_string(),
            active_share: round_to(active_share_between(&reference, &peer), 1),
        }
    });
    vs_each_peer.sort_by(|a, b| {
        a.active_share
            .partial_cmp(&b.active_share)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ActiveShare {
        vs_consensus: round_to(vs_consensus, 1),
        vs_each_peer,
        top_contributors: contributors,
    }
}

fn union<'k>(a: &Grouped<'k, f64>, b: &Grouped<'k, f64>) -> Vec<&'k str> {
    let mut seen = HashSet::new();
    a.keys().chain(b.keys()).filter(|t| seen.insert(*t)).collect()
}

/// Half the summed absolute weight difference over the union of tickers.
fn active_share_between(a: &Grouped<'_, f64>, b: &Grouped<'_, f64>) -> f64 {
    let only_b: f64 = b
        .iter()
        .filter(|(ticker, _)| !a.contains(ticker))
        .map(|(_, w)| w.abs())
        .sum();
    let shared_or_a: f64 = a
        .iter()
        .map(|(ticker, w)| (w - b.get(ticker).copied().unwrap_or(0.0)).abs())
        .sum();
    (shared_or_a + only_b) / 2.0
}
