//! Market capitalisation buckets.

use crate::analytics::group::sort_by_weight_desc;
use crate::analytics::round_to;
use crate::types::AnalyticsConfig;
use peerscope_core::EnrichedHolding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Market cap bucket of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CapBucket {
    /// At or above the large cap boundary.
    Large,
    /// At or above the mid cap boundary.
    Mid,
    /// Below the mid cap boundary.
    Small,
    /// No market cap available.
    Unknown,
}

impl CapBucket {
    /// All buckets in reporting order.
    pub const ALL: [CapBucket; 4] = [Self::Large, Self::Mid, Self::Small, Self::Unknown];

    /// Classifies a market cap in USD millions.
    ///
    /// Both boundaries are inclusive lower bounds.
    #[must_use]
    pub fn classify(market_cap_musd: Option<f64>, config: &AnalyticsConfig) -> Self {
        match market_cap_musd {
            None => Self::Unknown,
            Some(mc) if mc.is_nan() => Self::Unknown,
            Some(mc) if mc >= config.large_cap_min_musd => Self::Large,
            Some(mc) if mc >= config.mid_cap_min_musd => Self::Mid,
            Some(_) => Self::Small,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Large => "Large Cap",
            Self::Mid => "Mid Cap",
            Self::Small => "Small Cap",
            Self::Unknown => "Unknown",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CapBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of one fund's weight in each bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundCapBreakdown {
    /// Fund name.
    pub fund_name: String,
    /// True for the reference fund.
    pub is_reference: bool,
    /// Large cap percentage (2 decimals).
    pub large: f64,
    /// Mid cap percentage (2 decimals).
    pub mid: f64,
    /// Small cap percentage (2 decimals).
    pub small: f64,
    /// Unknown percentage (2 decimals).
    pub unknown: f64,
}

impl FundCapBreakdown {
    /// Percentage for one bucket.
    #[must_use]
    pub fn get(&self, bucket: CapBucket) -> f64 {
        match bucket {
            CapBucket::Large => self.large,
            CapBucket::Mid => self.mid,
            CapBucket::Small => self.small,
            CapBucket::Unknown => self.unknown,
        }
    }
}

/// Reference against peer average for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapBucketComparison {
    /// Bucket.
    pub bucket: CapBucket,
    /// Reference fund percentage.
    pub reference_weight: f64,
    /// Mean of peer fund percentages (2 decimals).
    pub peer_avg_weight: f64,
    /// Difference (2 decimals).
    pub active_weight: f64,
}

/// A reference fund holding with its bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapDetail {
    /// Ticker.
    pub ticker: String,
    /// Short name.
    pub short_name: Option<String>,
    /// Weight.
    pub weight: f64,
    /// Market cap in USD millions.
    pub market_cap_usd: Option<f64>,
    /// Bucket.
    pub bucket: CapBucket,
    /// Country.
    pub country: Option<String>,
    /// GICS sector.
    pub gics_sector: Option<String>,
}

/// Market cap analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapAnalysis {
    /// Per-fund breakdown, reference first then by fund name.
    pub by_fund: Vec<FundCapBreakdown>,
    /// Reference against peer average, one row per bucket.
    pub peer_avg: Vec<CapBucketComparison>,
    /// Reference holdings with bucket, weight-descending.
    pub reference_detail: Vec<CapDetail>,
}

/// Analyses allocation by market cap bucket.
///
/// The peer average is the simple mean of each peer fund's bucket
/// percentage, not a re-aggregation of raw weights.
#[must_use]
pub fn market_cap_analysis(rows: &[EnrichedHolding], config: &AnalyticsConfig) -> MarketCapAnalysis {
    let mut funds: BTreeMap<(bool, &str), (f64, [f64; 4])> = BTreeMap::new();
    for row in rows {
        let (total, buckets) = funds
            .entry((!row.is_reference, row.fund_name.as_str()))
            .or_default();
        *total += row.weight;
        buckets[CapBucket::classify(row.market_cap_usd, config).index()] += row.weight;
    }

    let by_fund: Vec<FundCapBreakdown> = funds
        .into_iter()
        .map(|((not_reference, fund), (total, buckets))| {
            let pct = |b: CapBucket| {
                if total > 0.0 {
                    round_to(buckets[b.index()] / total * 100.0, 2)
                } else {
                    0.0
                }
            };
            FundCapBreakdown {
                fund_name: fund.to_string(),
                is_reference: !not_reference,
                large: pct(CapBucket::Large),
                mid: pct(CapBucket::Mid),
                small: pct(CapBucket::Small),
                unknown: pct(CapBucket::Unknown),
            }
        })
        .collect();

    let reference = by_fund.iter().find(|f| f.is_reference);
    let peers: Vec<&FundCapBreakdown> = by_fund.iter().filter(|f| !f.is_reference).collect();
    let peer_avg = CapBucket::ALL
        .into_iter()
        .map(|bucket| {
            let reference_weight = reference.map_or(0.0, |r| r.get(bucket));
            let peer_avg_weight = if peers.is_empty() {
                0.0
            } else {
                round_to(
                    peers.iter().map(|p| p.get(bucket)).sum::<f64>() / peers.len() as f64,
                    2,
                )
            };
            CapBucketComparison {
                bucket,
                reference_weight,
                peer_avg_weight,
                active_weight: round_to(reference_weight - peer_avg_weight, 2),
            }
        })
        .collect();

    let mut reference_detail: Vec<CapDetail> = rows
        .iter()
        .filter(|r| r.is_reference)
        .map(|r| CapDetail {
            ticker: r.ticker.clone(),
            short_name: r.short_name.clone(),
            weight: r.weight,
            market_cap_usd: r.market_cap_usd,
            bucket: CapBucket::classify(r.market_cap_usd, config),
            country: r.country.clone(),
            gics_sector: r.gics_sector.clone(),
        })
        .collect();
    sort_by_weight_desc(&mut reference_detail, |d| d.weight);

    MarketCapAnalysis {
        by_fund,
        peer_avg,
        reference_detail,
    }
}
