//! Comparisons against a peer benchmark.
//!
//! The benchmark is always the peer average: total peer weight per key
//! divided by the number of peer funds, so a peer without a position
//! contributes zero.
//!
//! - [`conviction_positions`]: per-ticker active weights
//! - [`country_allocation`] / [`sector_allocation`]: grouped active weights
//! - [`active_share`]: versus the consensus portfolio and each peer

mod active_share;
mod allocation;
mod conviction;

pub use active_share::{active_share, ActiveShare, ActiveShareContributor, PeerActiveShare};
pub use allocation::{
    country_allocation, sector_allocation, AllocationRow, CountryAllocation, FundBreakdown,
    SectorAllocation, SectorCoverage,
};
pub use conviction::{conviction_positions, ConvictionRow};
