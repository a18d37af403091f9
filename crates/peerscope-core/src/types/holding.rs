//! Holding and instrument reference records.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A single holding row as produced by snapshot ingestion.
///
/// Weights are percentages of fund NAV (e.g. `4.2` for 4.2%). Zero and
/// negative weights occur for FX adjustment lines and are dropped during
/// enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    /// Name of the fund holding the position.
    pub fund_name: String,

    /// Bloomberg-style ticker (e.g. `"HDFCB IN Equity"`).
    pub ticker: String,

    /// Weight as percentage of the fund.
    pub weight: f64,

    /// Exchange code parsed from the ticker.
    pub exchange_code: Option<String>,

    /// Country derived from the exchange code.
    pub country_derived: Option<String>,

    /// True for currency / cash lines.
    pub is_cash: bool,
}

impl HoldingRecord {
    /// Creates a holding record without exchange or cash information.
    #[must_use]
    pub fn new(fund_name: impl Into<String>, ticker: impl Into<String>, weight: f64) -> Self {
        Self {
            fund_name: fund_name.into(),
            ticker: ticker.into(),
            weight,
            exchange_code: None,
            country_derived: None,
            is_cash: false,
        }
    }

    /// Creates a holding record, rejecting empty identifiers and non-finite weights.
    pub fn try_new(
        fund_name: impl Into<String>,
        ticker: impl Into<String>,
        weight: f64,
    ) -> CoreResult<Self> {
        let record = Self::new(fund_name, ticker, weight);
        if record.fund_name.trim().is_empty() {
            return Err(CoreError::missing_field("fund_name"));
        }
        if record.ticker.trim().is_empty() {
            return Err(CoreError::missing_field("ticker"));
        }
        if !weight.is_finite() {
            return Err(CoreError::InvalidWeight {
                fund: record.fund_name,
                ticker: record.ticker,
                value: weight,
            });
        }
        Ok(record)
    }

    /// Sets the exchange code.
    #[must_use]
    pub fn with_exchange_code(mut self, code: impl Into<String>) -> Self {
        self.exchange_code = Some(code.into());
        self
    }

    /// Sets the exchange-derived country.
    #[must_use]
    pub fn with_country_derived(mut self, country: impl Into<String>) -> Self {
        self.country_derived = Some(country.into());
        self
    }

    /// Marks the row as cash.
    #[must_use]
    pub fn with_cash(mut self, is_cash: bool) -> Self {
        self.is_cash = is_cash;
        self
    }
}

/// Instrument reference data for one ticker.
///
/// Exports routinely repeat a ticker; consumers keep the first row seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    /// Bloomberg-style ticker.
    pub ticker: String,

    /// Short display name.
    pub short_name: Option<String>,

    /// GICS industry.
    pub gics_industry: Option<String>,

    /// GICS sector.
    pub gics_sector: Option<String>,

    /// ISO alpha-2 country of the issuer.
    pub country_code: Option<String>,

    /// Market capitalization in USD millions.
    pub market_cap_usd: Option<f64>,

    /// ISIN.
    pub isin: Option<String>,

    /// Provider unique identifier.
    pub unique_id: Option<String>,
}

impl MasterRecord {
    /// Creates a reference record with only the ticker populated.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Sets the short name.
    #[must_use]
    pub fn with_short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    /// Sets the GICS sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.gics_sector = Some(sector.into());
        self
    }

    /// Sets the country code.
    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Sets the market cap (USD millions).
    #[must_use]
    pub fn with_market_cap(mut self, market_cap_usd: f64) -> Self {
        self.market_cap_usd = Some(market_cap_usd);
        self
    }
}

/// A holding joined with its reference data.
///
/// Produced by enrichment; only rows with a positive weight exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedHolding {
    // =========================================================================
    // HOLDING
    // =========================================================================
    /// Fund holding the position.
    pub fund_name: String,

    /// Instrument ticker.
    pub ticker: String,

    /// Weight as percentage of the fund (> 0).
    pub weight: f64,

    /// Exchange code parsed from the ticker.
    pub exchange_code: Option<String>,

    /// True for cash lines.
    pub is_cash: bool,

    /// True when the fund is the peer set's reference fund.
    pub is_reference: bool,

    // =========================================================================
    // REFERENCE DATA
    // =========================================================================
    /// Short display name.
    pub short_name: Option<String>,

    /// GICS industry.
    pub gics_industry: Option<String>,

    /// GICS sector.
    pub gics_sector: Option<String>,

    /// Master-data country code.
    pub country_code: Option<String>,

    /// Market capitalization in USD millions.
    pub market_cap_usd: Option<f64>,

    /// Resolved country name (master first, exchange fallback).
    pub country: Option<String>,
}

impl EnrichedHolding {
    /// Creates an enriched row with no reference data.
    #[must_use]
    pub fn new(fund_name: impl Into<String>, ticker: impl Into<String>, weight: f64) -> Self {
        Self {
            fund_name: fund_name.into(),
            ticker: ticker.into(),
            weight,
            exchange_code: None,
            is_cash: false,
            is_reference: false,
            short_name: None,
            gics_industry: None,
            gics_sector: None,
            country_code: None,
            market_cap_usd: None,
            country: None,
        }
    }

    /// Marks the row as belonging to the reference fund.
    #[must_use]
    pub fn with_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = is_reference;
        self
    }

    /// Marks the row as a cash line.
    #[must_use]
    pub fn with_cash(mut self, is_cash: bool) -> Self {
        self.is_cash = is_cash;
        self
    }

    /// Sets the short name.
    #[must_use]
    pub fn with_short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    /// Sets the GICS sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.gics_sector = Some(sector.into());
        self
    }

    /// Sets the resolved country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the market cap (USD millions).
    #[must_use]
    pub fn with_market_cap(mut self, market_cap_usd: f64) -> Self {
        self.market_cap_usd = Some(market_cap_usd);
        self
    }

    /// Returns the short name, falling back to the ticker.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.short_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.ticker,
        }
    }

    /// Returns the GICS sector if present and non-empty.
    #[must_use]
    pub fn sector(&self) -> Option<&str> {
        self.gics_sector.as_deref().filter(|s| !s.is_empty())
    }
}
