//! Peers command implementation.
//!
//! Loads one snapshot's inputs, selects a peer set and runs one analytic.

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::{info, warn};

use peerscope_core::{EnrichedHolding, Fund, MasterRecord};
use peerscope_ext_file::{load_funds, load_holdings, load_master};
use peerscope_portfolio::analytics::{
    concentration_metrics, consensus_holdings, fund_profiles, holdings_overlap, peer_overview,
    unique_positions, DistinctHolding,
};
use peerscope_portfolio::benchmark::{
    active_share, conviction_positions, country_allocation, sector_allocation, AllocationRow,
};
use peerscope_portfolio::bucketing::{market_cap_analysis, CapBucket};
use peerscope_portfolio::{validate_roster, AnalyticsConfig, PeerUniverse};

use crate::error::{CliError, CliResult};
use crate::output::{label, print_warning, KeyValue, Printer};

/// Analytics available to the peers command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Analytic {
    /// Headline metrics and a summary line per fund
    Overview,
    /// Shared positions between the reference fund and each peer
    Overlap,
    /// Reference weight against the peer average per ticker
    Conviction,
    /// Unique, rare and missing-consensus positions
    Unique,
    /// Tickers ranked by how many funds hold them
    Consensus,
    /// Country allocation against the peer average
    Country,
    /// Sector allocation and sector data coverage
    Sector,
    /// Concentration metrics per fund
    Concentration,
    /// Active share against the consensus portfolio and each peer
    ActiveShare,
    /// Market cap bucket weights
    MarketCap,
    /// Top holdings, sectors and countries per fund
    Profiles,
}

/// Arguments for the peers command.
#[derive(Args, Debug)]
pub struct PeersArgs {
    /// Analytic to run
    #[arg(value_enum)]
    pub analytic: Analytic,

    /// Holdings CSV (fund_name,ticker,weight[,exchange_code,country_derived,is_cash])
    #[arg(long)]
    pub holdings: PathBuf,

    /// Instrument master data CSV
    #[arg(long)]
    pub master: Option<PathBuf>,

    /// Fund roster CSV
    #[arg(long)]
    pub funds: PathBuf,

    /// Peer set to analyse
    #[arg(long)]
    pub peer_set: String,

    /// Restrict to these peer funds (repeatable)
    #[arg(long = "peer")]
    pub peers: Vec<String>,

    /// Keep cash lines
    #[arg(long)]
    pub include_cash: bool,

    /// Drop rows with weight at or below this value
    #[arg(long, default_value = "0")]
    pub min_weight: f64,

    /// Show at most this many rows per table
    #[arg(long)]
    pub top: Option<usize>,
}

/// Execute the peers command.
pub fn execute(args: PeersArgs, config: &AnalyticsConfig, printer: Printer) -> CliResult<()> {
    if !args.min_weight.is_finite() {
        return Err(CliError::InvalidArgument(format!(
            "--min-weight must be a number, got {}",
            args.min_weight
        )));
    }

    let holdings = load_holdings(&args.holdings)?;
    let master: Vec<MasterRecord> = match &args.master {
        Some(path) => load_master(path)?,
        None => Vec::new(),
    };
    let funds = load_funds(&args.funds)?;
    validate_roster(&funds)?;

    if !funds.iter().any(|f| f.peer_set.as_str() == args.peer_set) {
        return Err(CliError::InvalidArgument(format!(
            "peer set '{}' not found in {}",
            args.peer_set,
            args.funds.display()
        )));
    }

    let mut universe = PeerUniverse::new(&funds, args.peer_set.as_str())
        .include_cash(args.include_cash)
        .min_weight(args.min_weight);
    if !args.peers.is_empty() {
        universe = universe.select_peers(args.peers.iter().cloned());
    }
    if universe.reference().is_none() {
        print_warning(&format!(
            "Peer set '{}' has no reference fund; comparisons will be empty",
            args.peer_set
        ));
    }

    let rows = universe.build(&holdings, &master);
    info!(
        peer_set = %args.peer_set,
        peers = universe.peers().len(),
        rows = rows.len(),
        "Running {:?}",
        args.analytic
    );
    if rows.is_empty() {
        warn!(peer_set = %args.peer_set, "no holdings selected");
    }
    printer.info(&format!(
        "{}: reference {}, {} peers",
        args.peer_set,
        universe.reference().map_or("none", |f| f.name.as_str()),
        universe.peers().len()
    ));

    let view = View {
        rows: &rows,
        funds: &funds,
        config,
        printer,
        top: args.top,
    };
    match args.analytic {
        Analytic::Overview => view.overview(),
        Analytic::Overlap => view.overlap(),
        Analytic::Conviction => view.conviction(),
        Analytic::Unique => view.unique(),
        Analytic::Consensus => view.consensus(),
        Analytic::Country => view.country(),
        Analytic::Sector => view.sector(),
        Analytic::Concentration => view.concentration(),
        Analytic::ActiveShare => view.active_share(),
        Analytic::MarketCap => view.market_cap(),
        Analytic::Profiles => view.profiles(),
    }
}

struct View<'a> {
    rows: &'a [EnrichedHolding],
    funds: &'a [Fund],
    config: &'a AnalyticsConfig,
    printer: Printer,
    top: Option<usize>,
}

impl View<'_> {
    fn limit<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if let Some(n) = self.top {
            items.truncate(n);
        }
        items
    }

    fn overview(&self) -> CliResult<()> {
        let overview = peer_overview(self.rows, self.funds, self.config);
        if self.printer.is_json() {
            return self.printer.json(&overview);
        }

        let p = &self.printer;
        let headline = vec![
            KeyValue::new("Reference fund", label(overview.reference_fund.as_deref())),
            KeyValue::new("Positions", overview.reference_positions.to_string()),
            KeyValue::new(
                "Active share vs consensus",
                p.weight(overview.active_share_vs_consensus),
            ),
            KeyValue::new("Top 10 weight", p.weight(overview.reference_top_10_weight)),
            KeyValue::new("Unique positions", overview.unique_positions.to_string()),
            KeyValue::new(
                "Sector coverage",
                p.opt_weight(overview.reference_sector_coverage),
            ),
            KeyValue::new("Peers", overview.num_peers.to_string()),
        ];
        p.section("Overview", &headline)?;

        let summaries: Vec<SummaryLine> = overview
            .funds
            .iter()
            .map(|f| SummaryLine {
                fund: f.display_name.clone(),
                holdings_date: f
                    .holdings_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
                positions: f.positions,
                top_10: p.weight(f.top_10_weight),
                top_20: p.weight(f.top_20_weight),
                largest: f.largest_holding.clone(),
                largest_weight: p.weight(f.largest_weight),
            })
            .collect();
        p.section("Funds", &summaries)
    }

    fn overlap(&self) -> CliResult<()> {
        let overlap = self.limit(holdings_overlap(self.rows, self.config));
        if self.printer.is_json() {
            return self.printer.json(&overlap);
        }
        let p = &self.printer;
        let lines: Vec<OverlapLine> = overlap
            .iter()
            .map(|o| OverlapLine {
                fund: o.fund_name.clone(),
                overlap: o.overlap_count,
                reference_total: o.reference_total,
                peer_total: o.peer_total,
                weight_reference: p.weight(o.overlap_weight_reference),
                weight_peer: p.weight(o.overlap_weight_peer),
                jaccard: format!("{:.3}", o.jaccard_index),
            })
            .collect();
        p.section("Holdings Overlap", &lines)
    }

    fn conviction(&self) -> CliResult<()> {
        let rows = self.limit(conviction_positions(self.rows));
        if self.printer.is_json() {
            return self.printer.json(&rows);
        }
        let p = &self.printer;
        let lines: Vec<ConvictionLine> = rows
            .iter()
            .map(|r| ConvictionLine {
                ticker: r.ticker.clone(),
                name: label(r.short_name.as_deref()),
                reference: p.weight(r.reference_weight),
                peer_avg: p.weight(r.peer_avg_weight),
                holders: r.peer_holder_count,
                active: p.signed(Some(r.active_weight)),
                country: label(r.country.as_deref()),
                sector: label(r.gics_sector.as_deref()),
            })
            .collect();
        p.section("Conviction Positions", &lines)
    }

    fn unique(&self) -> CliResult<()> {
        let unique = unique_positions(self.rows, self.config);
        if self.printer.is_json() {
            return self.printer.json(&unique);
        }
        let p = &self.printer;
        let distinct = |items: &[DistinctHolding]| -> Vec<DistinctLine> {
            self.limit(
                items
                    .iter()
                    .map(|d| DistinctLine {
                        ticker: d.ticker.clone(),
                        name: label(d.short_name.as_deref()),
                        weight: p.weight(d.weight),
                        peer_count: d.peer_count,
                        country: label(d.country.as_deref()),
                        sector: label(d.gics_sector.as_deref()),
                    })
                    .collect(),
            )
        };
        p.section("Unique to Reference", &distinct(&unique.reference_unique))?;
        p.section(
            &format!(
                "Rare (held by at most {} peers)",
                self.config.rare_peer_threshold
            ),
            &distinct(&unique.reference_rare),
        )?;

        let missing: Vec<MissingLine> = self.limit(
            unique
                .consensus_missing
                .iter()
                .map(|m| MissingLine {
                    ticker: m.ticker.clone(),
                    name: label(m.short_name.as_deref()),
                    holders: m.holder_count,
                    avg_weight: p.weight(m.avg_weight),
                    country: label(m.country.as_deref()),
                    sector: label(m.gics_sector.as_deref()),
                })
                .collect(),
        );
        p.section("Consensus Not Held", &missing)
    }

    fn consensus(&self) -> CliResult<()> {
        let rows = self.limit(consensus_holdings(self.rows));
        if self.printer.is_json() {
            return self.printer.json(&rows);
        }
        let p = &self.printer;
        let lines: Vec<ConsensusLine> = rows
            .iter()
            .map(|r| ConsensusLine {
                ticker: r.ticker.clone(),
                name: label(r.short_name.as_deref()),
                holders: r.num_holders,
                pct_of_funds: format!("{:.1}", r.pct_of_funds),
                avg_weight: p.weight(r.avg_weight),
                max_weight: p.weight(r.max_weight),
                max_fund: r.max_weight_fund.clone(),
                reference: if r.held_by_reference {
                    p.weight(r.reference_weight)
                } else {
                    "-".to_string()
                },
            })
            .collect();
        p.section("Consensus Holdings", &lines)
    }

    fn allocation_lines(&self, rows: &[AllocationRow]) -> Vec<AllocationLine> {
        let p = &self.printer;
        self.limit(
            rows.iter()
                .map(|r| AllocationLine {
                    name: r.name.clone(),
                    reference: p.weight(r.reference_weight),
                    peer_avg: p.weight(r.peer_avg_weight),
                    active: p.signed(Some(r.active_weight)),
                })
                .collect(),
        )
    }

    fn country(&self) -> CliResult<()> {
        let allocation = country_allocation(self.rows);
        if self.printer.is_json() {
            return self.printer.json(&allocation);
        }
        let p = &self.printer;
        p.section(
            "Country Allocation",
            &self.allocation_lines(&allocation.comparison),
        )?;

        let per_fund: Vec<FundItemLine> = allocation
            .per_fund
            .iter()
            .flat_map(|f| {
                f.items.iter().map(move |item| FundItemLine {
                    fund: f.fund_name.clone(),
                    kind: "country".to_string(),
                    name: item.name.clone(),
                    weight: p.weight(item.weight),
                })
            })
            .collect();
        p.section("Peer Country Weights", &per_fund)
    }

    fn sector(&self) -> CliResult<()> {
        let allocation = sector_allocation(self.rows);
        if self.printer.is_json() {
            return self.printer.json(&allocation);
        }
        let p = &self.printer;
        p.section(
            "Sector Allocation",
            &self.allocation_lines(&allocation.comparison),
        )?;

        let coverage: Vec<CoverageLine> = allocation
            .coverage
            .iter()
            .map(|c| CoverageLine {
                fund: c.fund_name.clone(),
                reference: c.is_reference,
                coverage: format!("{:.1}", c.coverage_pct),
            })
            .collect();
        p.section("Sector Data Coverage", &coverage)
    }

    fn concentration(&self) -> CliResult<()> {
        let rows = concentration_metrics(self.rows);
        if self.printer.is_json() {
            return self.printer.json(&rows);
        }
        let p = &self.printer;
        let lines: Vec<ConcentrationLine> = rows
            .iter()
            .map(|r| ConcentrationLine {
                fund: r.fund_name.clone(),
                reference: r.is_reference,
                positions: r.num_positions,
                top_5: p.weight(r.top_5_weight),
                top_10: p.weight(r.top_10_weight),
                top_20: p.weight(r.top_20_weight),
                hhi: format!("{:.1}", r.hhi),
                effective: format!("{:.1}", r.effective_positions),
                largest: r.max_position_name.clone(),
                largest_weight: p.weight(r.max_position_weight),
            })
            .collect();
        p.section("Concentration", &lines)
    }

    fn active_share(&self) -> CliResult<()> {
        let result = active_share(self.rows, self.config);
        if self.printer.is_json() {
            return self.printer.json(&result);
        }
        let p = &self.printer;
        p.section(
            "Active Share",
            &[KeyValue::new(
                "Versus consensus",
                p.weight(result.vs_consensus),
            )],
        )?;

        let per_peer: Vec<KeyValue> = result
            .vs_each_peer
            .iter()
            .map(|a| KeyValue::new(a.fund_name.clone(), p.weight(a.active_share)))
            .collect();
        p.section("Versus Each Peer", &per_peer)?;

        let contributors: Vec<ContributorLine> = self.limit(
            result
                .top_contributors
                .iter()
                .map(|c| ContributorLine {
                    ticker: c.ticker.clone(),
                    name: label(c.short_name.as_deref()),
                    reference: p.weight(c.reference_weight),
                    consensus: p.weight(c.consensus_weight),
                    contribution: p.weight(c.contribution),
                })
                .collect(),
        );
        p.section("Top Contributors", &contributors)
    }

    fn market_cap(&self) -> CliResult<()> {
        let analysis = market_cap_analysis(self.rows, self.config);
        if self.printer.is_json() {
            return self.printer.json(&analysis);
        }
        let p = &self.printer;
        let by_fund: Vec<CapLine> = analysis
            .by_fund
            .iter()
            .map(|f| CapLine {
                fund: f.fund_name.clone(),
                reference: f.is_reference,
                large: p.weight(f.get(CapBucket::Large)),
                mid: p.weight(f.get(CapBucket::Mid)),
                small: p.weight(f.get(CapBucket::Small)),
                unknown: p.weight(f.get(CapBucket::Unknown)),
            })
            .collect();
        p.section("Market Cap by Fund", &by_fund)?;

        let comparison: Vec<AllocationLine> = analysis
            .peer_avg
            .iter()
            .map(|c| AllocationLine {
                name: c.bucket.label().to_string(),
                reference: p.weight(c.reference_weight),
                peer_avg: p.weight(c.peer_avg_weight),
                active: p.signed(Some(c.active_weight)),
            })
            .collect();
        p.section("Reference vs Peer Average", &comparison)?;

        let detail: Vec<CapDetailLine> = self.limit(
            analysis
                .reference_detail
                .iter()
                .map(|d| CapDetailLine {
                    ticker: d.ticker.clone(),
                    name: label(d.short_name.as_deref()),
                    weight: p.weight(d.weight),
                    market_cap: d
                        .market_cap_usd
                        .map_or_else(|| "-".to_string(), |m| format!("{m:.0}")),
                    bucket: d.bucket.label().to_string(),
                })
                .collect(),
        );
        p.section("Reference Holdings", &detail)
    }

    fn profiles(&self) -> CliResult<()> {
        let profiles = fund_profiles(self.rows, self.config);
        if self.printer.is_json() {
            return self.printer.json(&profiles);
        }
        let p = &self.printer;
        let mut lines = Vec::new();
        for profile in &profiles {
            let fund = if profile.is_reference {
                format!("{} (Reference)", profile.fund_name)
            } else {
                profile.fund_name.clone()
            };
            let line = |kind: &str, name: &str, weight: f64| FundItemLine {
                fund: fund.clone(),
                kind: kind.to_string(),
                name: name.to_string(),
                weight: p.weight(weight),
            };
            lines.extend(profile.top_holdings.iter().map(|h| line("holding", &h.name, h.weight)));
            lines.extend(profile.sectors.iter().map(|s| line("sector", &s.name, s.weight)));
            lines.extend(profile.countries.iter().map(|c| line("country", &c.name, c.weight)));
        }
        p.section("Fund Profiles", &lines)
    }
}

#[derive(Serialize, Tabled)]
struct SummaryLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Holdings Date")]
    holdings_date: String,
    #[tabled(rename = "Positions")]
    positions: usize,
    #[tabled(rename = "Top 10")]
    top_10: String,
    #[tabled(rename = "Top 20")]
    top_20: String,
    #[tabled(rename = "Largest")]
    largest: String,
    #[tabled(rename = "Weight")]
    largest_weight: String,
}

#[derive(Serialize, Tabled)]
struct OverlapLine {
    #[tabled(rename = "Peer")]
    fund: String,
    #[tabled(rename = "Shared")]
    overlap: usize,
    #[tabled(rename = "Ref Positions")]
    reference_total: usize,
    #[tabled(rename = "Peer Positions")]
    peer_total: usize,
    #[tabled(rename = "Ref Weight")]
    weight_reference: String,
    #[tabled(rename = "Peer Weight")]
    weight_peer: String,
    #[tabled(rename = "Jaccard")]
    jaccard: String,
}

#[derive(Serialize, Tabled)]
struct ConvictionLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Peer Avg")]
    peer_avg: String,
    #[tabled(rename = "Holders")]
    holders: usize,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Sector")]
    sector: String,
}

#[derive(Serialize, Tabled)]
struct DistinctLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Peers Holding")]
    peer_count: usize,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Sector")]
    sector: String,
}

#[derive(Serialize, Tabled)]
struct MissingLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Holders")]
    holders: usize,
    #[tabled(rename = "Avg Weight")]
    avg_weight: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Sector")]
    sector: String,
}

#[derive(Serialize, Tabled)]
struct ConsensusLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Holders")]
    holders: usize,
    #[tabled(rename = "% of Funds")]
    pct_of_funds: String,
    #[tabled(rename = "Avg Weight")]
    avg_weight: String,
    #[tabled(rename = "Max Weight")]
    max_weight: String,
    #[tabled(rename = "Max Fund")]
    max_fund: String,
    #[tabled(rename = "Reference")]
    reference: String,
}

#[derive(Serialize, Tabled)]
struct AllocationLine {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Peer Avg")]
    peer_avg: String,
    #[tabled(rename = "Active")]
    active: String,
}

#[derive(Serialize, Tabled)]
struct FundItemLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Serialize, Tabled)]
struct CoverageLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Reference")]
    reference: bool,
    #[tabled(rename = "Coverage %")]
    coverage: String,
}

#[derive(Serialize, Tabled)]
struct ConcentrationLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Reference")]
    reference: bool,
    #[tabled(rename = "Positions")]
    positions: usize,
    #[tabled(rename = "Top 5")]
    top_5: String,
    #[tabled(rename = "Top 10")]
    top_10: String,
    #[tabled(rename = "Top 20")]
    top_20: String,
    #[tabled(rename = "HHI")]
    hhi: String,
    #[tabled(rename = "Effective N")]
    effective: String,
    #[tabled(rename = "Largest")]
    largest: String,
    #[tabled(rename = "Weight")]
    largest_weight: String,
}

#[derive(Serialize, Tabled)]
struct ContributorLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Consensus")]
    consensus: String,
    #[tabled(rename = "Contribution %")]
    contribution: String,
}

#[derive(Serialize, Tabled)]
struct CapLine {
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Reference")]
    reference: bool,
    #[tabled(rename = "Large")]
    large: String,
    #[tabled(rename = "Mid")]
    mid: String,
    #[tabled(rename = "Small")]
    small: String,
    #[tabled(rename = "Unknown")]
    unknown: String,
}

#[derive(Serialize, Tabled)]
struct CapDetailLine {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Market Cap ($M)")]
    market_cap: String,
    #[tabled(rename = "Bucket")]
    bucket: String,
}
