//! Record enrichment.
//!
//! Joins raw holdings with instrument reference data and resolves each
//! row's country. This is the only entry point from raw records into the
//! analytics; every analytic assumes its input went through [`enrich`].

use peerscope_core::country::country_from_code;
use peerscope_core::{EnrichedHolding, HoldingRecord, MasterRecord};
use std::collections::HashMap;
use tracing::debug;

/// Enriches holdings with master data.
///
/// - Rows with weight ≤ 0 (FX adjustment lines) are dropped.
/// - Master data is deduplicated by ticker, keeping the first record supplied.
/// - The join is a left join: unmatched holdings keep empty reference fields.
/// - `country` is the master country code mapped to a name, falling back to
///   the exchange-derived country.
///
/// Output order follows input order. `is_reference` is left `false`; see
/// [`annotate`].
#[must_use]
pub fn enrich(holdings: &[HoldingRecord], master: &[MasterRecord]) -> Vec<EnrichedHolding> {
    let mut by_ticker: HashMap<&str, &MasterRecord> = HashMap::with_capacity(master.len());
    let mut duplicates = 0usize;
    for record in master {
        if by_ticker.contains_key(record.ticker.as_str()) {
            duplicates += 1;
        } else {
            by_ticker.insert(record.ticker.as_str(), record);
        }
    }
    if duplicates > 0 {
        debug!(duplicates, "dropped duplicate master records");
    }

    let enriched: Vec<EnrichedHolding> = holdings
        .iter()
        .filter(|h| h.weight > 0.0)
        .map(|h| join_one(h, by_ticker.get(h.ticker.as_str()).copied()))
        .collect();

    debug!(
        input = holdings.len(),
        kept = enriched.len(),
        "enriched holdings"
    );
    enriched
}

fn join_one(holding: &HoldingRecord, master: Option<&MasterRecord>) -> EnrichedHolding {
    let master_country = master
        .and_then(|m| m.country_code.as_deref())
        .and_then(country_from_code)
        .map(str::to_string);

    EnrichedHolding {
        fund_name: holding.fund_name.clone(),
        ticker: holding.ticker.clone(),
        weight: holding.weight,
        exchange_code: holding.exchange_code.clone(),
        is_cash: holding.is_cash,
        is_reference: false,
        short_name: master.and_then(|m| m.short_name.clone()),
        gics_industry: master.and_then(|m| m.gics_industry.clone()),
        gics_sector: master.and_then(|m| m.gics_sector.clone()),
        country_code: master.and_then(|m| m.country_code.clone()),
        market_cap_usd: master.and_then(|m| m.market_cap_usd),
        country: master_country.or_else(|| holding.country_derived.clone()),
    }
}

/// Flags rows belonging to the named reference fund.
///
/// Returns a new collection; rows of every other fund are marked as peers.
#[must_use]
pub fn annotate(rows: &[EnrichedHolding], reference_fund: Option<&str>) -> Vec<EnrichedHolding> {
    rows.iter()
        .map(|row| {
            let is_reference = reference_fund.is_some_and(|name| name == row.fund_name);
            row.clone().with_reference(is_reference)
        })
        .collect()
}
