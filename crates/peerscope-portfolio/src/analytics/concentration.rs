//! Concentration metrics per fund.

use super::group::sort_by_weight_desc;
use super::round_to;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Concentration metrics for one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRow {
    /// Fund name.
    pub fund_name: String,

    /// True for the reference fund.
    pub is_reference: bool,

    /// Number of position rows.
    pub num_positions: usize,

    /// Sum of the 5 largest weights.
    pub top_5_weight: f64,

    /// Sum of the 10 largest weights.
    pub top_10_weight: f64,

    /// Sum of the 20 largest weights.
    pub top_20_weight: f64,

    /// Herfindahl index on weights renormalized to 100 (1 decimal).
    pub hhi: f64,

    /// 10000 / HHI (1 decimal), or the position count when HHI is 0.
    pub effective_positions: f64,

    /// Largest single weight.
    pub max_position_weight: f64,

    /// Display name of the largest position.
    pub max_position_name: String,
}

/// Herfindahl-Hirschman index of weights renormalized to sum to 100.
///
/// Returns 0 when the weights sum to 0 or less.
#[must_use]
pub fn herfindahl(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights
        .iter()
        .map(|w| {
            let normalized = w / total * 100.0;
            normalized * normalized
        })
        .sum()
}

/// Computes concentration metrics for every fund in the rows.
///
/// Reference fund first, then peers by name.
#[must_use]
pub fn concentration_metrics(rows: &[EnrichedHolding]) -> Vec<ConcentrationRow> {
    let mut funds: BTreeMap<(&str, bool), Vec<&EnrichedHolding>> = BTreeMap::new();
    for row in rows {
        funds
            .entry((row.fund_name.as_str(), row.is_reference))
            .or_default()
            .push(row);
    }

    let mut result: Vec<ConcentrationRow> = funds
        .into_iter()
        .map(|((fund, is_reference), mut positions)| {
            sort_by_weight_desc(&mut positions, |p| p.weight);
            let weights: Vec<f64> = positions.iter().map(|p| p.weight).collect();
            let top = |n: usize| weights.iter().take(n).sum::<f64>();

            let hhi = herfindahl(&weights);
            let effective_positions = if hhi > 0.0 {
                round_to(10_000.0 / hhi, 1)
            } else {
                weights.len() as f64
            };

            ConcentrationRow {
                fund_name: fund.to_string(),
                is_reference,
                num_positions: weights.len(),
                top_5_weight: top(5),
                top_10_weight: top(10),
                top_20_weight: top(20),
                hhi: round_to(hhi, 1),
                effective_positions,
                max_position_weight: weights.first().copied().unwrap_or(0.0),
                max_position_name: positions
                    .first()
                    .map(|p| p.display_name().to_string())
                    .unwrap_or_default(),
            }
        })
        .collect();

    result.sort_by(|a, b| b.is_reference.cmp(&a.is_reference));
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
    fn test_herfindahl() {
        assert_relative_eq!(herfindahl(&[50.0, 50.0]), 5000.0);
        // scale invariant
        assert_relative_eq!(herfindahl(&[1.0, 1.0]), 5000.0);
        assert_relative_eq!(herfindahl(&[7.0]), 10_000.0);
        assert_eq!(herfindahl(&[]), 0.0);
    }

    #[test]
    fn test_concentration_basic() {
        let mut rows = vec![row("Own", "BIG", 30.0, true).with_short_name("Big Co")];
        for i in 0..24 {
            rows.push(row("Own", &format!("T{i}"), 2.0, true));
        }
        rows.push(row("Peer", "X", 10.0, false));
        rows.push(row("Peer", "Y", 10.0, false));

        let result = concentration_metrics(&rows);
        assert_eq!(result.len(), 2);
        let own = &result[0];
        assert!(own.is_reference);
        assert_eq!(own.num_positions, 25);
        assert_relative_eq!(own.top_5_weight, 38.0);
        assert_relative_eq!(own.top_10_weight, 48.0);
        assert_relative_eq!(own.top_20_weight, 68.0);
        assert_relative_eq!(own.max_position_weight, 30.0);
        assert_eq!(own.max_position_name, "Big Co");

        let peer = &result[1];
        assert_relative_eq!(peer.hhi, 5000.0);
        assert_relative_eq!(peer.effective_positions, 2.0);
        assert_eq!(peer.max_position_name, "X");
    }

    #[test]
    fn test_reference_sorted_first() {
        let rows = vec![
            row("AAA Peer", "X", 1.0, false),
            row("ZZZ Own", "Y", 1.0, true),
        ];
        let result = concentration_metrics(&rows);
        assert_eq!(result[0].fund_name, "ZZZ Own");
    }

    #[test]
    fn test_empty() {
        assert!(concentration_metrics(&[]).is_empty());
    }
}
