//! Configuration types for peer analytics.
//!
//! - [`AnalyticsConfig`]: thresholds and parallelism for analytics computation

mod config;

pub use config::AnalyticsConfig;
