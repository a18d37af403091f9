//! Per-fund profile cards: top holdings, sectors and countries.

use super::group::{breakdown, sort_by_weight_desc, Descriptors, Grouped};
use crate::types::AnalyticsConfig;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A label with an aggregated weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    /// Sector or country name.
    pub name: String,
    /// Summed weight.
    pub weight: f64,
}

/// One aggregated holding in a fund profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileHolding {
    /// Ticker.
    pub ticker: String,
    /// Short name, or the ticker when none is known.
    pub name: String,
    /// Weight summed across duplicate rows.
    pub weight: f64,
    /// GICS sector.
    pub gics_sector: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// Summary card for one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundProfile {
    /// Fund name.
    pub fund_name: String,
    /// True for the reference fund.
    pub is_reference: bool,
    /// Largest holdings, weight-descending.
    pub top_holdings: Vec<ProfileHolding>,
    /// Weight per GICS sector, weight-descending.
    pub sectors: Vec<WeightedItem>,
    /// Weight per country, weight-descending.
    pub countries: Vec<WeightedItem>,
}

/// Builds a profile for every fund.
///
/// Reference fund first, then peers alphabetically. Duplicate tickers within
/// a fund are summed before ranking; `config.profile_top_n` caps the holdings.
#[must_use]
pub fn fund_profiles(rows: &[EnrichedHolding], config: &AnalyticsConfig) -> Vec<FundProfile> {
    let mut funds: BTreeMap<(bool, &str), Vec<&EnrichedHolding>> = BTreeMap::new();
    for row in rows {
        // `!is_reference` sorts the reference fund first
        funds
            .entry((!row.is_reference, row.fund_name.as_str()))
            .or_default()
            .push(row);
    }

    funds
        .into_iter()
        .map(|((not_reference, fund), fund_rows)| {
            profile(fund, !not_reference, &fund_rows, config.profile_top_n)
        })
        .collect()
}

fn profile(fund: &str, is_reference: bool, rows: &[&EnrichedHolding], top_n: usize) -> FundProfile {
    let mut aggregated: Grouped<'_, (f64, Descriptors)> = Grouped::new();
    for row in rows {
        let (weight, descriptors) = aggregated.entry(row.ticker.as_str());
        *weight += row.weight;
        descriptors.fill_from(row);
    }

    let mut holdings: Vec<ProfileHolding> = aggregated
        .iter()
        .map(|(ticker, (weight, d))| ProfileHolding {
            ticker: ticker.to_string(),
            name: d
                .short_name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| ticker.to_string()),
            weight: *weight,
            gics_sector: d.gics_sector.clone().filter(|s| !s.is_empty()),
            country: d.country.clone().filter(|s| !s.is_empty()),
        })
        .collect();
    sort_by_weight_desc(&mut holdings, |h| h.weight);

    let sectors = breakdown(holdings.iter().map(|h| (h.gics_sector.as_deref(), h.weight)));
    let countries = breakdown(holdings.iter().map(|h| (h.country.as_deref(), h.weight)));
    holdings.truncate(top_n);

    FundProfile {
        fund_name: fund.to_string(),
        is_reference,
        top_holdings: holdings,
        sectors,
        countries,
    }
}
