//! Country and sector allocation versus the peer average.

use crate::analytics::group::{breakdown, sort_by_weight_desc, Grouped};
use crate::analytics::round_to;
use crate::analytics::split::PeerSplit;
use crate::analytics::WeightedItem;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference and peer-average weight for one country or sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Country or GICS sector.
    pub name: String,

    /// Reference fund weight.
    pub reference_weight: f64,

    /// Total peer weight divided by the number of peer funds.
    pub peer_avg_weight: f64,

    /// `reference_weight - peer_avg_weight`.
    pub active_weight: f64,
}

/// One peer fund's weight per country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundBreakdown {
    /// Peer fund name.
    pub fund_name: String,
    /// Weight per country, weight-descending.
    pub items: Vec<WeightedItem>,
}

/// Country allocation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryAllocation {
    /// Reference versus peer average, reference weight descending.
    pub comparison: Vec<AllocationRow>,
    /// Per-peer breakdown in fund-name order.
    pub per_fund: Vec<FundBreakdown>,
}

/// Share of a fund's weight that carries a GICS sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorCoverage {
    /// Fund name.
    pub fund_name: String,
    /// True for the reference fund.
    pub is_reference: bool,
    /// Percentage of total weight with sector data (1 decimal).
    pub coverage_pct: f64,
}

/// Sector allocation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorAllocation {
    /// Reference versus peer average, reference weight descending.
    pub comparison: Vec<AllocationRow>,
    /// Coverage per fund in fund-name order.
    pub coverage: Vec<SectorCoverage>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Compares country allocation of the reference fund with the peer average.
///
/// Rows without a resolved country are left out.
#[must_use]
pub fn country_allocation(rows: &[EnrichedHolding]) -> CountryAllocation {
    let split = PeerSplit::new(rows);
    let comparison = compare(&split, |row| non_empty(row.country.as_ref()));

    let per_fund = split
        .peer_groups()
        .into_iter()
        .map(|(fund, fund_rows)| FundBreakdown {
            fund_name: fund.to_string(),
            items: breakdown(
                fund_rows
                    .iter()
                    .map(|r| (non_empty(r.country.as_ref()), r.weight)),
            ),
        })
        .collect();

    CountryAllocation {
        comparison,
        per_fund,
    }
}

/// Compares GICS sector allocation of the reference fund with the peer average.
///
/// Only rows with a sector take part, so `num_peers` counts peers with at
/// least one sector-tagged row. Coverage is measured against each fund's full
/// weight; cash rows never count as covered.
#[must_use]
pub fn sector_allocation(rows: &[EnrichedHolding]) -> SectorAllocation {
    let mut funds: BTreeMap<&str, (bool, f64, f64)> = BTreeMap::new();
    for row in rows {
        let (is_reference, total, covered) = funds.entry(row.fund_name.as_str()).or_default();
        *is_reference |= row.is_reference;
        *total += row.weight;
        if !row.is_cash && row.sector().is_some() {
            *covered += row.weight;
        }
    }
    let coverage = funds
        .into_iter()
        .map(|(fund, (is_reference, total, covered))| SectorCoverage {
            fund_name: fund.to_string(),
            is_reference,
            coverage_pct: if total > 0.0 {
                round_to(covered / total * 100.0, 1)
            } else {
                0.0
            },
        })
        .collect();

    let with_sector: Vec<EnrichedHolding> = rows
        .iter()
        .filter(|r| r.sector().is_some())
        .cloned()
        .collect();
    let split = PeerSplit::new(&with_sector);
    let comparison = compare(&split, |row| row.sector());

    SectorAllocation {
        comparison,
        coverage,
    }
}

fn compare<'a>(
    split: &PeerSplit<'a>,
    key: impl Fn(&'a EnrichedHolding) -> Option<&'a str>,
) -> Vec<AllocationRow> {
    let mut totals: Grouped<'a, (f64, f64)> = Grouped::new();
    for &row in split.reference() {
        if let Some(k) = key(row) {
            totals.entry(k).0 += row.weight;
        }
    }
    for &row in split.peers() {
        if let Some(k) = key(row) {
            totals.entry(k).1 += row.weight;
        }
    }

    let mut result: Vec<AllocationRow> = totals
        .iter()
        .map(|(name, (reference_weight, peer_total))| {
            let peer_avg_weight = split.peer_average(*peer_total);
            AllocationRow {
                name: name.to_string(),
                reference_weight: *reference_weight,
                peer_avg_weight,
                active_weight: reference_weight - peer_avg_weight,
            }
        })
        .collect();
    sort_by_weight_desc(&mut result, |r| r.reference_weight);
    result
}
