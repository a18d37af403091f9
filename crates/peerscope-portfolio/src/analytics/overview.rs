//! Headline metrics for a peer set.

use super::concentration::concentration_metrics;
use super::round_to;
use super::uniqueness::unique_positions;
use crate::benchmark::{active_share, sector_allocation};
use crate::types::AnalyticsConfig;
use chrono::NaiveDate;
use peerscope_core::{EnrichedHolding, Fund};
use serde::{Deserialize, Serialize};

/// Summary line for one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    /// Fund name.
    pub fund_name: String,
    /// Name tagged with the reference marker where applicable.
    pub display_name: String,
    /// True for the reference fund.
    pub is_reference: bool,
    /// Portfolio date from the roster.
    pub holdings_date: Option<NaiveDate>,
    /// Number of positions.
    pub positions: usize,
    /// Top 10 weight (1 decimal).
    pub top_10_weight: f64,
    /// Top 20 weight (1 decimal).
    pub top_20_weight: f64,
    /// Largest holding's display name.
    pub largest_holding: String,
    /// Largest holding's weight (2 decimals).
    pub largest_weight: f64,
}

/// Headline metrics for the reference fund and a summary of every fund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerOverview {
    /// Reference fund name, if present in the rows.
    pub reference_fund: Option<String>,
    /// Reference position count.
    pub reference_positions: usize,
    /// Active share versus the consensus portfolio.
    pub active_share_vs_consensus: f64,
    /// Reference top 10 weight.
    pub reference_top_10_weight: f64,
    /// Number of reference positions no peer holds.
    pub unique_positions: usize,
    /// Share of reference weight with sector data.
    pub reference_sector_coverage: Option<f64>,
    /// Number of peer funds with rows.
    pub num_peers: usize,
    /// One line per fund, reference first.
    pub funds: Vec<FundSummary>,
}

/// Builds the overview from the other analytics.
///
/// `roster` supplies holdings dates and display names; funds missing from it
/// are reported under their raw name.
#[must_use]
pub fn peer_overview(
    rows: &[EnrichedHolding],
    roster: &[Fund],
    config: &AnalyticsConfig,
) -> PeerOverview {
    let concentration = concentration_metrics(rows);
    let reference = concentration.iter().find(|c| c.is_reference);
    let active = active_share(rows, config);
    let unique = unique_positions(rows, config);
    let sectors = sector_allocation(rows);

    let funds = concentration
        .iter()
        .map(|c| {
            let fund = roster.iter().find(|f| f.name == c.fund_name);
            FundSummary {
                fund_name: c.fund_name.clone(),
                display_name: fund.map_or_else(|| c.fund_name.clone(), Fund::display_name),
                is_reference: c.is_reference,
                holdings_date: fund.and_then(|f| f.holdings_date),
                positions: c.num_positions,
                top_10_weight: round_to(c.top_10_weight, 1),
                top_20_weight: round_to(c.top_20_weight, 1),
                largest_holding: c.max_position_name.clone(),
                largest_weight: round_to(c.max_position_weight, 2),
            }
        })
        .collect();

    PeerOverview {
        reference_fund: reference.map(|c| c.fund_name.clone()),
        reference_positions: reference.map_or(0, |c| c.num_positions),
        active_share_vs_consensus: active.vs_consensus,
        reference_top_10_weight: reference.map_or(0.0, |c| c.top_10_weight),
        unique_positions: unique.reference_unique.len(),
        reference_sector_coverage: sectors
            .coverage
            .iter()
            .find(|c| c.is_reference)
            .map(|c| c.coverage_pct),
        num_peers: concentration.iter().filter(|c| !c.is_reference).count(),
        funds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overview() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let roster = vec![
            Fund::reference("Own", "Asia").with_holdings_date(date),
            Fund::peer("P1", "Asia"),
        ];
        let rows = vec![
            EnrichedHolding::new("Own", "A", 6.0)
                .with_reference(true)
                .with_sector("Tech"),
            EnrichedHolding::new("Own", "B", 4.0).with_reference(true),
            EnrichedHolding::new("P1", "A", 5.0),
        ];
        let overview = peer_overview(&rows, &roster, &AnalyticsConfig::default());

        assert_eq!(overview.reference_fund.as_deref(), Some("Own"));
        assert_eq!(overview.reference_positions, 2);
        assert_eq!(overview.unique_positions, 1);
        assert_eq!(overview.num_peers, 1);
        assert_relative_eq!(overview.reference_top_10_weight, 10.0);
        assert_relative_eq!(overview.active_share_vs_consensus, 40.0);
        assert_eq!(overview.reference_sector_coverage, Some(60.0));

        assert_eq!(overview.funds.len(), 2);
        assert_eq!(overview.funds[0].display_name, "Own (Reference)");
        assert_eq!(overview.funds[0].holdings_date, Some(date));
        assert_eq!(overview.funds[1].display_name, "P1");
        assert_eq!(overview.funds[1].largest_holding, "A");
    }

    #[test]
    fn test_overview_without_reference() {
        let rows = vec![EnrichedHolding::new("P1", "A", 5.0)];
        let overview = peer_overview(&rows, &[], &AnalyticsConfig::default());
        assert_eq!(overview.reference_fund, None);
        assert_eq!(overview.reference_positions, 0);
        assert_eq!(overview.active_share_vs_consensus, 0.0);
        assert_eq!(overview.funds[0].display_name, "P1");
    }
}
