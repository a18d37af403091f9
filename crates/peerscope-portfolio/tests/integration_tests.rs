//! Integration tests for peerscope-portfolio.
//!
//! These tests run the analytics end-to-end on a small but realistic
//! emerging-markets peer set: roster selection, enrichment and every
//! analytic over the same snapshot.

use approx::assert_relative_eq;
use peerscope_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn roster() -> Vec<Fund> {
    vec![
        Fund::reference("Frontier Opportunities", "EM"),
        Fund::peer("Meridian EM Equity", "EM"),
        Fund::peer("Delta Asia Growth", "EM"),
        Fund::peer("Closed Fund", "EM").with_holdings(false),
        Fund::reference("India Focus", "India"),
    ]
}

fn master() -> Vec<MasterRecord> {
    vec![
        MasterRecord::new("HDFCB IN Equity")
            .with_short_name("HDFC Bank")
            .with_sector("Financials")
            .with_country_code("IN")
            .with_market_cap(150_000.0),
        MasterRecord::new("700 HK Equity")
            .with_short_name("Tencent")
            .with_sector("Communication Services")
            .with_country_code("CN")
            .with_market_cap(400_000.0),
        MasterRecord::new("PETR4 BZ Equity")
            .with_short_name("Petrobras")
            .with_sector("Energy")
            .with_country_code("BR")
            .with_market_cap(9_000.0),
        MasterRecord::new("KSPI KZ Equity")
            .with_short_name("Kaspi")
            .with_sector("Financials")
            .with_country_code("KZ")
            .with_market_cap(2_000.0),
        // duplicate: first record wins
        MasterRecord::new("HDFCB IN Equity").with_short_name("Stale HDFC"),
    ]
}

fn holdings() -> Vec<HoldingRecord> {
    vec![
        HoldingRecord::new("Frontier Opportunities", "HDFCB IN Equity", 8.0)
            .with_country_derived("India"),
        HoldingRecord::new("Frontier Opportunities", "KSPI KZ Equity", 6.0),
        HoldingRecord::new("Frontier Opportunities", "NEWCO VN Equity", 4.0)
            .with_country_derived("Vietnam"),
        HoldingRecord::new("Frontier Opportunities", "USD Curncy", 2.0).with_cash(true),
        HoldingRecord::new("Frontier Opportunities", "FX ADJ", -0.4),
        HoldingRecord::new("Meridian EM Equity", "HDFCB IN Equity", 5.0),
        HoldingRecord::new("Meridian EM Equity", "700 HK Equity", 9.0),
        HoldingRecord::new("Meridian EM Equity", "PETR4 BZ Equity", 4.0),
        HoldingRecord::new("Delta Asia Growth", "700 HK Equity", 7.0),
        HoldingRecord::new("Delta Asia Growth", "HDFCB IN Equity", 3.0),
        HoldingRecord::new("Closed Fund", "700 HK Equity", 50.0),
        HoldingRecord::new("India Focus", "HDFCB IN Equity", 10.0),
    ]
}

fn snapshot() -> Vec<EnrichedHolding> {
    PeerUniverse::new(&roster(), "EM").build(&holdings(), &master())
}

// =============================================================================
// SELECTION AND ENRICHMENT
// =============================================================================

#[test]
fn test_universe_selection() {
    let rows = snapshot();
    // cash, negative weight, closed fund and other peer set are gone
    assert_eq!(rows.len(), 8);
    assert_eq!(rows.iter().filter(|r| r.is_reference).count(), 3);
    assert!(rows.iter().all(|r| r.fund_name != "Closed Fund"));

    let hdfc = &rows[0];
    assert_eq!(hdfc.short_name.as_deref(), Some("HDFC Bank"));
    assert_eq!(hdfc.country.as_deref(), Some("India"));

    let newco = rows.iter().find(|r| r.ticker == "NEWCO VN Equity").unwrap();
    assert_eq!(newco.short_name, None);
    assert_eq!(newco.country.as_deref(), Some("Vietnam"));
}

#[test]
fn test_overlap_scenario() {
    // reference {A:10, B:5}, peer {A:6, C:4}
    let rows = vec![
        EnrichedHolding::new("Own", "A", 10.0).with_reference(true),
        EnrichedHolding::new("Own", "B", 5.0).with_reference(true),
        EnrichedHolding::new("P", "A", 6.0),
        EnrichedHolding::new("P", "C", 4.0),
    ];
    let overlap = holdings_overlap(&rows, &AnalyticsConfig::default());
    assert_eq!(overlap.len(), 1);
    assert_eq!(overlap[0].overlap_count, 1);
    assert_relative_eq!(overlap[0].jaccard_index, 1.0 / 3.0);
    assert_relative_eq!(overlap[0].overlap_weight_reference, 10.0);
    assert_relative_eq!(overlap[0].overlap_weight_peer, 6.0);
}

// =============================================================================
// FULL SNAPSHOT
// =============================================================================

#[test]
fn test_full_snapshot_analytics() {
    let config = AnalyticsConfig::default();
    let rows = snapshot();

    let overlap = holdings_overlap(&rows, &config);
    assert_eq!(overlap.len(), 2);
    assert!(overlap.iter().all(|o| o.overlap_count == 1));
    // equal overlap keeps fund-name order
    assert_eq!(overlap[0].fund_name, "Delta Asia Growth");

    let conviction = conviction_positions(&rows);
    assert_eq!(conviction[0].ticker, "700 HK Equity");
    assert_relative_eq!(conviction[0].peer_avg_weight, 8.0);
    assert_relative_eq!(conviction[0].active_weight, -8.0);
    assert_eq!(conviction[0].short_name.as_deref(), Some("Tencent"));

    let unique = unique_positions(&rows, &config);
    let unique_tickers: Vec<_> = unique
        .reference_unique
        .iter()
        .map(|u| u.ticker.as_str())
        .collect();
    assert_eq!(unique_tickers, vec!["KSPI KZ Equity", "NEWCO VN Equity"]);
    assert_eq!(unique.reference_rare.len(), 3);
    assert_eq!(unique.consensus_missing[0].ticker, "700 HK Equity");
    assert_eq!(unique.consensus_missing[0].holder_count, 2);

    let consensus = consensus_holdings(&rows);
    assert_eq!(consensus[0].ticker, "HDFCB IN Equity");
    assert_eq!(consensus[0].num_holders, 3);
    assert_relative_eq!(consensus[0].pct_of_funds, 100.0);

    let countries = country_allocation(&rows);
    assert_eq!(countries.comparison[0].name, "India");
    assert_relative_eq!(countries.comparison[0].peer_avg_weight, 4.0);
    assert_eq!(countries.per_fund.len(), 2);

    let sectors = sector_allocation(&rows);
    let own = sectors
        .coverage
        .iter()
        .find(|c| c.is_reference)
        .map(|c| c.coverage_pct);
    // 14 of 18 reference weight carries a sector
    assert_eq!(own, Some(77.8));

    let concentration = concentration_metrics(&rows);
    assert!(concentration[0].is_reference);
    assert_eq!(concentration[0].max_position_name, "HDFC Bank");

    let share = active_share(&rows, &config);
    assert!(share.vs_consensus > 50.0 && share.vs_consensus <= 100.0);
    assert_eq!(share.vs_each_peer.len(), 2);

    let caps = market_cap_analysis(&rows, &config);
    assert_eq!(caps.by_fund[0].fund_name, "Frontier Opportunities");
    assert_relative_eq!(caps.by_fund[0].large, 44.44);
    assert_relative_eq!(caps.by_fund[0].small, 33.33);
    assert_relative_eq!(caps.by_fund[0].unknown, 22.22);

    let overview = peer_overview(&rows, &roster(), &config);
    assert_eq!(overview.reference_positions, 3);
    assert_eq!(overview.unique_positions, 2);
    assert_eq!(overview.num_peers, 2);
    assert_eq!(
        overview.funds[0].display_name,
        "Frontier Opportunities (Reference)"
    );

    let profiles = fund_profiles(&rows, &config);
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[1].fund_name, "Delta Asia Growth");
}

// =============================================================================
// DEGRADED STATES
// =============================================================================

#[test]
fn test_peer_set_without_reference() {
    let funds = vec![Fund::peer("P1", "X"), Fund::peer("P2", "X")];
    let holdings = vec![
        HoldingRecord::new("P1", "A", 5.0),
        HoldingRecord::new("P2", "A", 5.0),
    ];
    let rows = PeerUniverse::new(&funds, "X").build(&holdings, &[]);
    let config = AnalyticsConfig::default();

    assert!(holdings_overlap(&rows, &config).is_empty());
    assert!(conviction_positions(&rows).is_empty());
    assert_eq!(unique_positions(&rows, &config), UniquePositions::default());
    assert_eq!(active_share(&rows, &config), ActiveShare::default());
    // still meaningful without a reference
    assert_eq!(consensus_holdings(&rows).len(), 1);
    assert_eq!(concentration_metrics(&rows).len(), 2);
}

#[test]
fn test_peer_set_without_peers() {
    let funds = vec![Fund::reference("Own", "X")];
    let holdings = vec![HoldingRecord::new("Own", "A", 5.0)];
    let rows = PeerUniverse::new(&funds, "X").build(&holdings, &[]);
    let config = AnalyticsConfig::default();

    assert!(holdings_overlap(&rows, &config).is_empty());
    assert!(conviction_positions(&rows).is_empty());
    let unique = unique_positions(&rows, &config);
    assert_eq!(unique.reference_unique.len(), 1);
    assert!(unique.consensus_missing.is_empty());
    assert_eq!(active_share(&rows, &config).vs_consensus, 0.0);
    assert_eq!(country_allocation(&rows).comparison.len(), 0);
}
