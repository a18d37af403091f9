//! # Peerscope Core
//!
//! Core record types and reference tables for the Peerscope holdings analytics library.
//!
//! This crate provides the building blocks shared by the analytics crates:
//!
//! - **Records**: `HoldingRecord`, `MasterRecord`, `EnrichedHolding`, `Fund`, `TemporalFact`
//! - **Reference tables**: exchange-code and country-code to country-name resolution
//! - **Normalization**: fund-name cleanup for names scraped from inconsistent encodings
//!
//! ## Design Philosophy
//!
//! - **Typed records**: Every tabular entity has a fixed schema; absent values are `Option`
//! - **Immutable inputs**: Records are created once by loaders and only read afterwards
//! - **No I/O**: Parsing of spreadsheets, HTML and CSV lives in adapter crates
//!
//! ## Example
//!
//! ```rust
//! use peerscope_core::prelude::*;
//!
//! let holding = HoldingRecord::new("Asia Fund", "HDFCB IN Equity", 4.2)
//!     .with_exchange_code("IN");
//! assert_eq!(holding.exchange_code.as_deref(), Some("IN"));
//! assert_eq!(country_from_exchange("IN"), Some("India"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod country;
pub mod error;
pub mod names;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::country::{country_from_code, country_from_exchange};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::names::normalize_fund_name;
    pub use crate::types::{
        Category, EnrichedHolding, FactKey, Fund, HoldingRecord, MasterRecord, PeerSetId,
        TemporalFact,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use names::normalize_fund_name;
pub use types::{
    Category, EnrichedHolding, FactKey, Fund, HoldingRecord, MasterRecord, PeerSetId, TemporalFact,
};
