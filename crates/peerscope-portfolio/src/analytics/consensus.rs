//! Consensus holdings across the whole peer set, reference included.

use super::group::{Descriptors, Grouped};
use super::round_to;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How widely one ticker is held across all funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRow {
    /// Ticker.
    pub ticker: String,

    /// Short name.
    pub short_name: Option<String>,

    /// Number of distinct funds holding the ticker.
    pub num_holders: usize,

    /// Holders as a percentage of all funds (1 decimal).
    pub pct_of_funds: f64,

    /// Mean weight across holding rows.
    pub avg_weight: f64,

    /// Largest single weight.
    pub max_weight: f64,

    /// Fund with the largest weight (first in input order on ties).
    pub max_weight_fund: String,

    /// True when the reference fund holds the ticker.
    pub held_by_reference: bool,

    /// Reference fund weight (0 when not held).
    pub reference_weight: f64,

    /// Country.
    pub country: Option<String>,

    /// GICS sector.
    pub gics_sector: Option<String>,
}

#[derive(Default)]
struct Accumulator<'a> {
    holders: HashSet<&'a str>,
    rows: usize,
    total: f64,
    max: Option<(f64, &'a str)>,
    reference_weight: f64,
    held_by_reference: bool,
    descriptors: Descriptors,
}

/// Ranks tickers by how many funds hold them.
///
/// Sorted by holder count then average weight, both descending.
#[must_use]
pub fn consensus_holdings(rows: &[EnrichedHolding]) -> Vec<ConsensusRow> {
    let total_funds = rows
        .iter()
        .map(|r| r.fund_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    if total_funds == 0 {
        return Vec::new();
    }

    let mut grouped: Grouped<'_, Accumulator<'_>> = Grouped::new();
    for row in rows {
        let acc = grouped.entry(row.ticker.as_str());
        acc.holders.insert(row.fund_name.as_str());
        acc.rows += 1;
        acc.total += row.weight;
        if acc.max.map_or(true, |(max, _)| row.weight > max) {
            acc.max = Some((row.weight, row.fund_name.as_str()));
        }
        if row.is_reference {
            acc.held_by_reference = true;
            acc.reference_weight += row.weight;
        }
        acc.descriptors.fill_from(row);
    }

    let mut result: Vec<ConsensusRow> = grouped
        .iter()
        .map(|(ticker, acc)| {
            let (max_weight, max_fund) = acc.max.unwrap_or((0.0, ""));
            ConsensusRow {
                ticker: ticker.to_string(),
                short_name: acc.descriptors.short_name.clone(),
                num_holders: acc.holders.len(),
                pct_of_funds: round_to(acc.holders.len() as f64 / total_funds as f64 * 100.0, 1),
                avg_weight: acc.total / acc.rows as f64,
                max_weight,
                max_weight_fund: max_fund.to_string(),
                held_by_reference: acc.held_by_reference,
                reference_weight: acc.reference_weight,
                country: acc.descriptors.country.clone(),
                gics_sector: acc.descriptors.gics_sector.clone(),
            }
        })
        .collect();

    result.sort_by(|a, b| {
        b.num_holders.cmp(&a.num_holders).then_with(|| {
            b.avg_weight
                .partial_cmp(&a.avg_weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    result
}
