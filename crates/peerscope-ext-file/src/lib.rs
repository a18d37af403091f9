//! # Peerscope File Adapters
//!
//! CSV loaders that turn exported spreadsheets into Peerscope records.
//!
//! | File | Loader | Output |
//! |------|--------|--------|
//! | holdings | [`load_holdings`] | [`HoldingRecord`](peerscope_core::HoldingRecord) |
//! | master data | [`load_master`] | [`MasterRecord`](peerscope_core::MasterRecord) |
//! | fund roster | [`load_funds`] | [`Fund`](peerscope_core::Fund) |
//! | fact log | [`load_facts`] | [`TemporalFact`](peerscope_core::TemporalFact) |
//!
//! Cells holding Bloomberg error values (`#N/A ...`) are read as missing.
//! Holdings rows with an unparseable weight are skipped with a warning.
//!
//! ## Example
//!
//! ```rust
//! use peerscope_ext_file::read_holdings;
//!
//! let csv = "fund_name,ticker,weight\nOwn Fund,HDFCB IN Equity,4.5\n";
//! let holdings = read_holdings(csv.as_bytes()).unwrap();
//! assert_eq!(holdings[0].country_derived.as_deref(), Some("India"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod bloomberg;
mod error;
mod facts;
mod funds;
mod holdings;
mod master;
mod reader;

pub use bloomberg::{
    extract_exchange_code, is_cash_ticker, is_unresolved, parse_flag, parse_market_cap,
    parse_percentage,
};
pub use error::{FileError, FileResult};
pub use facts::{load_facts, read_facts};
pub use funds::{load_funds, read_funds};
pub use holdings::{load_holdings, read_holdings};
pub use master::{load_master, read_master};
