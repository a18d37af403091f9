//! Parallel processing utilities for per-peer analytics.
//!
//! Provides conditional parallel iteration based on configuration
//! and peer count. Uses rayon when the `parallel` feature is enabled.
//! Output order always matches input order.

use crate::types::AnalyticsConfig;

/// Maps a function over items, conditionally using parallel iteration.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The collection size reaches `config.parallel_threshold`
///
/// # Example
///
/// ```ignore
/// let rows = maybe_parallel_map(&split.peer_groups(), config, |(fund, rows)| overlap_row(fund, rows));
/// ```
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &AnalyticsConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}
