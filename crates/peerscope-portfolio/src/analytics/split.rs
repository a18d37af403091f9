//! Reference / peer partition of a snapshot.

use peerscope_core::EnrichedHolding;
use std::collections::BTreeMap;

/// Rows of one snapshot partitioned into the reference fund and its peers.
///
/// `num_peers` counts distinct peer fund names, not rows.
#[derive(Debug, Clone)]
pub struct PeerSplit<'a> {
    reference: Vec<&'a EnrichedHolding>,
    peers: Vec<&'a EnrichedHolding>,
    peer_groups: BTreeMap<&'a str, Vec<&'a EnrichedHolding>>,
}

impl<'a> PeerSplit<'a> {
    /// Partitions rows on `is_reference`, preserving input order.
    #[must_use]
    pub fn new(rows: &'a [EnrichedHolding]) -> Self {
        let mut reference = Vec::new();
        let mut peers = Vec::new();
        let mut peer_groups: BTreeMap<&'a str, Vec<&'a EnrichedHolding>> = BTreeMap::new();
        for row in rows {
            if row.is_reference {
                reference.push(row);
            } else {
                peers.push(row);
                peer_groups.entry(row.fund_name.as_str()).or_default().push(row);
            }
        }
        Self {
            reference,
            peers,
            peer_groups,
        }
    }

    /// Reference fund rows.
    #[must_use]
    pub fn reference(&self) -> &[&'a EnrichedHolding] {
        &self.reference
    }

    /// Peer rows across all peer funds.
    #[must_use]
    pub fn peers(&self) -> &[&'a EnrichedHolding] {
        &self.peers
    }

    /// True when the reference fund has at least one row.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Number of distinct peer funds.
    #[must_use]
    pub fn num_peers(&self) -> usize {
        self.peer_groups.len()
    }

    /// Peer rows grouped by fund, in fund-name order.
    #[must_use]
    pub fn peer_groups(&self) -> Vec<(&'a str, &[&'a EnrichedHolding])> {
        self.peer_groups
            .iter()
            .map(|(name, rows)| (*name, rows.as_slice()))
            .collect()
    }

    /// Total peer weight for a grouping divided by the number of peers.
    ///
    /// Peers without a position contribute zero. Returns 0 with no peers.
    #[must_use]
    pub fn peer_average(&self, peer_total: f64) -> f64 {
        match self.num_peers() {
            0 => 0.0,
            n => peer_total / n as f64,
        }
    }
}
