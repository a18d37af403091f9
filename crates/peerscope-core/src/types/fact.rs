//! Dated holdings / sector observations for longitudinal tracking.

use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of item a temporal fact describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Top holdings (item is a company).
    Holdings,
    /// Sector breakdown (item is a sector).
    Sectors,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 2] = [Category::Holdings, Category::Sectors];

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Holdings => "Holdings",
            Self::Sectors => "Sectors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "holdings" | "holding" => Ok(Self::Holdings),
            "sectors" | "sector" => Ok(Self::Sectors),
            _ => Err(CoreError::unknown_category(s)),
        }
    }
}

/// Comparison key of a fact within one log date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactKey {
    /// Fund name.
    pub fund_name: String,
    /// Category.
    pub category: Category,
    /// Company or sector name.
    pub item_name: String,
}

/// One recorded observation of a fund's holding or sector weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalFact {
    /// Date the observation was recorded.
    pub log_date: NaiveDate,

    /// Holdings or sectors.
    pub category: Category,

    /// Fund name.
    pub fund_name: String,

    /// Company or sector name.
    pub item_name: String,

    /// Percentage of the fund; `None` marks a removed entry.
    pub percentage: Option<f64>,

    /// As-of date of the underlying data.
    pub date_of_data: Option<NaiveDate>,

    /// Page the observation was taken from.
    pub source_url: String,
}

impl TemporalFact {
    /// Creates a fact with a percentage and no as-of date or source.
    #[must_use]
    pub fn new(
        log_date: NaiveDate,
        category: Category,
        fund_name: impl Into<String>,
        item_name: impl Into<String>,
        percentage: f64,
    ) -> Self {
        Self {
            log_date,
            category,
            fund_name: fund_name.into(),
            item_name: item_name.into(),
            percentage: Some(percentage),
            date_of_data: None,
            source_url: String::new(),
        }
    }

    /// Sets the as-of date.
    #[must_use]
    pub fn with_date_of_data(mut self, date: NaiveDate) -> Self {
        self.date_of_data = Some(date);
        self
    }

    /// Sets the source URL.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Returns the comparison key.
    #[must_use]
    pub fn key(&self) -> FactKey {
        FactKey {
            fund_name: self.fund_name.clone(),
            category: self.category,
            item_name: self.item_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Holdings".parse::<Category>().unwrap(), Category::Holdings);
        assert_eq!(" sectors ".parse::<Category>().unwrap(), Category::Sectors);
        assert!("Regions".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn test_key_ignores_date_and_value() {
        let a = TemporalFact::new(date(1), Category::Holdings, "F", "X", 5.0);
        let b = TemporalFact::new(date(8), Category::Holdings, "F", "X", 7.0);
        assert_eq!(a.key(), b.key());

        let c = TemporalFact::new(date(1), Category::Sectors, "F", "X", 5.0);
        assert_ne!(a.key(), c.key());
    }
}
