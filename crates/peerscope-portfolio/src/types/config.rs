//! Configuration for peer analytics computation.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Configuration for peer analytics computation.
///
/// Controls classification thresholds, result sizes and parallelism.
/// Fields missing from a serialized config take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum number of peer funds to trigger parallel processing.
    pub parallel_threshold: usize,

    /// A reference holding held by at most this many peers is "rare".
    pub rare_peer_threshold: usize,

    /// Fraction of peers that must hold a ticker for it to be consensus.
    pub consensus_fraction: f64,

    /// Number of active share contributors to report.
    pub top_contributors: usize,

    /// Lower bound (USD millions, inclusive) of the large cap bucket.
    pub large_cap_min_musd: f64,

    /// Lower bound (USD millions, inclusive) of the mid cap bucket.
    pub mid_cap_min_musd: f64,

    /// Number of holdings shown in a fund profile.
    pub profile_top_n: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: 100,
            rare_peer_threshold: 2,
            consensus_fraction: 0.5,
            top_contributors: 20,
            large_cap_min_musd: 10_000.0,
            mid_cap_min_musd: 2_500.0,
            profile_top_n: 10,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the rare-holding peer threshold.
    #[must_use]
    pub fn with_rare_peer_threshold(mut self, threshold: usize) -> Self {
        self.rare_peer_threshold = threshold;
        self
    }

    /// Sets the consensus fraction.
    #[must_use]
    pub fn with_consensus_fraction(mut self, fraction: f64) -> Self {
        self.consensus_fraction = fraction;
        self
    }

    /// Sets the number of active share contributors.
    #[must_use]
    pub fn with_top_contributors(mut self, n: usize) -> Self {
        self.top_contributors = n;
        self
    }

    /// Sets the market cap bucket boundaries (USD millions).
    #[must_use]
    pub fn with_cap_thresholds(mut self, large_min: f64, mid_min: f64) -> Self {
        self.large_cap_min_musd = large_min;
        self.mid_cap_min_musd = mid_min;
        self
    }

    /// Sets the number of holdings in a fund profile.
    #[must_use]
    pub fn with_profile_top_n(mut self, n: usize) -> Self {
        self.profile_top_n = n;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Number of peer holders a ticker needs to count as consensus.
    ///
    /// `max(1, num_peers × consensus_fraction)`, compared with `>=`.
    #[must_use]
    pub fn consensus_threshold(&self, num_peers: usize) -> f64 {
        (num_peers as f64 * self.consensus_fraction).max(1.0)
    }

    /// Validates thresholds.
    pub fn validate(&self) -> PortfolioResult<()> {
        if !(self.consensus_fraction > 0.0 && self.consensus_fraction <= 1.0) {
            return Err(PortfolioError::invalid_config(
                "consensus_fraction",
                format!("must be in (0, 1], got {}", self.consensus_fraction),
            ));
        }
        if !self.mid_cap_min_musd.is_finite() || self.mid_cap_min_musd < 0.0 {
            return Err(PortfolioError::invalid_config(
                "mid_cap_min_musd",
                "must be a non-negative number",
            ));
        }
        if !self.large_cap_min_musd.is_finite() || self.large_cap_min_musd <= self.mid_cap_min_musd
        {
            return Err(PortfolioError::invalid_config(
                "large_cap_min_musd",
                "must exceed mid_cap_min_musd",
            ));
        }
        if self.profile_top_n == 0 {
            return Err(PortfolioError::invalid_config(
                "profile_top_n",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
