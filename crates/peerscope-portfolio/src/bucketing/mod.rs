//! Holdings classification into buckets.

mod market_cap;

pub use market_cap::{
    market_cap_analysis, CapBucket, CapBucketComparison, CapDetail, FundCapBreakdown,
    MarketCapAnalysis,
};
