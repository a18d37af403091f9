//! Fund roster entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a peer set (a named group of comparable funds).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerSetId(String);

impl PeerSetId {
    /// Creates a new peer set identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerSetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A fund in a snapshot's roster.
///
/// Exactly one fund per (snapshot, peer set) is the reference fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Fund name, as used on holding rows.
    pub name: String,

    /// Fund ISIN.
    pub isin: Option<String>,

    /// Peer set the fund belongs to.
    pub peer_set: PeerSetId,

    /// True for the fund being evaluated against its peers.
    pub is_reference: bool,

    /// False when the export contained no holdings sheet for the fund.
    pub has_holdings: bool,

    /// Portfolio date of the fund's holdings.
    pub holdings_date: Option<NaiveDate>,
}

impl Fund {
    /// Creates a peer fund with holdings.
    #[must_use]
    pub fn peer(name: impl Into<String>, peer_set: impl Into<PeerSetId>) -> Self {
        Self {
            name: name.into(),
            isin: None,
            peer_set: peer_set.into(),
            is_reference: false,
            has_holdings: true,
            holdings_date: None,
        }
    }

    /// Creates the reference fund of a peer set.
    #[must_use]
    pub fn reference(name: impl Into<String>, peer_set: impl Into<PeerSetId>) -> Self {
        Self {
            is_reference: true,
            ..Self::peer(name, peer_set)
        }
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Sets whether the fund has holdings.
    #[must_use]
    pub fn with_holdings(mut self, has_holdings: bool) -> Self {
        self.has_holdings = has_holdings;
        self
    }

    /// Sets the holdings date.
    #[must_use]
    pub fn with_holdings_date(mut self, date: NaiveDate) -> Self {
        self.holdings_date = Some(date);
        self
    }

    /// Returns the name tagged with "(Reference)" for the reference fund.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_reference {
            format!("{} (Reference)", self.name)
        } else {
            self.name.clone()
        }
    }
}
