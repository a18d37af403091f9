//! CLI command implementations.

pub mod config;
pub mod history;
pub mod peers;

pub use config::ConfigArgs;
pub use history::HistoryArgs;
pub use peers::PeersArgs;
