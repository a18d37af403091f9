//! Record types shared across Peerscope crates.
//!
//! - [`HoldingRecord`]: one raw (fund, ticker, weight) row from a snapshot export
//! - [`MasterRecord`]: instrument reference data keyed by ticker
//! - [`EnrichedHolding`]: a holding joined with its reference data
//! - [`Fund`]: roster entry identifying the reference fund and its peers
//! - [`TemporalFact`]: a dated (fund, category, item, percentage) observation

mod fact;
mod fund;
mod holding;

pub use fact::{Category, FactKey, TemporalFact};
pub use fund::{Fund, PeerSetId};
pub use holding::{EnrichedHolding, HoldingRecord, MasterRecord};
