//! Peer universe selection.
//!
//! Selects one peer set's rows out of a snapshot using the fund roster,
//! then enriches and flags them. The result is the input every analytic
//! in this crate expects.

use crate::enrich::{annotate, enrich};
use crate::{PortfolioError, PortfolioResult};
use peerscope_core::{EnrichedHolding, Fund, HoldingRecord, MasterRecord, PeerSetId};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Selection of a peer set's holdings from a snapshot.
///
/// # Example
///
/// ```rust,ignore
/// use peerscope_portfolio::prelude::*;
///
/// let rows = PeerUniverse::new(&funds, "Asia")
///     .min_weight(0.1)
///     .select_peers(["Peer A", "Peer B"])
///     .build(&holdings, &master);
/// let overlap = holdings_overlap(&rows, &AnalyticsConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct PeerUniverse<'a> {
    funds: &'a [Fund],
    peer_set: PeerSetId,
    include_cash: bool,
    min_weight: f64,
    selected_peers: Option<HashSet<String>>,
}

impl<'a> PeerUniverse<'a> {
    /// Creates a selection for one peer set. Cash rows are excluded by default.
    #[must_use]
    pub fn new(funds: &'a [Fund], peer_set: impl Into<PeerSetId>) -> Self {
        Self {
            funds,
            peer_set: peer_set.into(),
            include_cash: false,
            min_weight: 0.0,
            selected_peers: None,
        }
    }

    /// Sets whether cash rows are kept.
    #[must_use]
    pub fn include_cash(mut self, include: bool) -> Self {
        self.include_cash = include;
        self
    }

    /// Keeps only rows with weight strictly above `min_weight` (ignored when ≤ 0).
    #[must_use]
    pub fn min_weight(mut self, min_weight: f64) -> Self {
        self.min_weight = min_weight;
        self
    }

    /// Restricts peers to the given fund names. The reference fund is always kept.
    #[must_use]
    pub fn select_peers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_peers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the peer set being selected.
    #[must_use]
    pub fn peer_set(&self) -> &PeerSetId {
        &self.peer_set
    }

    /// Returns the reference fund of the peer set, if any.
    ///
    /// With several flagged funds the first in roster order wins.
    #[must_use]
    pub fn reference(&self) -> Option<&'a Fund> {
        self.members().find(|f| f.is_reference)
    }

    /// Returns the peer funds with holdings, after the peer filter.
    #[must_use]
    pub fn peers(&self) -> Vec<&'a Fund> {
        self.members()
            .filter(|f| !f.is_reference && f.has_holdings && self.is_selected(&f.name))
            .collect()
    }

    fn members(&self) -> impl Iterator<Item = &'a Fund> + '_ {
        self.funds.iter().filter(move |f| f.peer_set == self.peer_set)
    }

    fn is_selected(&self, name: &str) -> bool {
        self.selected_peers
            .as_ref()
            .map_or(true, |selected| selected.contains(name))
    }

    /// Selects, enriches and flags the peer set's holdings.
    #[must_use]
    pub fn build(&self, holdings: &[HoldingRecord], master: &[MasterRecord]) -> Vec<EnrichedHolding> {
        let reference = self.reference();
        if reference.is_none() {
            warn!(peer_set = %self.peer_set, "peer set has no reference fund");
        }

        let mut keep: HashSet<&str> = self.peers().into_iter().map(|f| f.name.as_str()).collect();
        if let Some(r) = reference.filter(|r| r.has_holdings) {
            keep.insert(r.name.as_str());
        }

        let selected: Vec<HoldingRecord> = holdings
            .iter()
            .filter(|h| keep.contains(h.fund_name.as_str()))
            .filter(|h| self.include_cash || !h.is_cash)
            .filter(|h| self.min_weight <= 0.0 || h.weight > self.min_weight)
            .cloned()
            .collect();

        debug!(
            peer_set = %self.peer_set,
            funds = keep.len(),
            rows = selected.len(),
            "selected peer universe"
        );

        let enriched = enrich(&selected, master);
        annotate(&enriched, reference.map(|r| r.name.as_str()))
    }
}

/// Checks that no peer set flags more than one reference fund.
pub fn validate_roster(funds: &[Fund]) -> PortfolioResult<()> {
    let mut counts: BTreeMap<&PeerSetId, usize> = BTreeMap::new();
    for fund in funds.iter().filter(|f| f.is_reference) {
        *counts.entry(&fund.peer_set).or_default() += 1;
    }
    match counts.into_iter().find(|(_, count)| *count > 1) {
        Some((peer_set, count)) => Err(PortfolioError::AmbiguousReference {
            peer_set: peer_set.to_string(),
            count,
        }),
        None => Ok(()),
    }
}
