//! Comparison window selection.

use crate::config::HistoryConfig;
use crate::diff::{compute_diffs, FactChange};
use chrono::NaiveDate;
use peerscope_core::{normalize_fund_name, Category, FactKey, TemporalFact};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Returns the `n` most recent distinct log dates, oldest first.
#[must_use]
pub fn latest_dates(facts: &[TemporalFact], n: usize) -> Vec<NaiveDate> {
    let distinct: BTreeSet<NaiveDate> = facts.iter().map(|f| f.log_date).collect();
    let skip = distinct.len().saturating_sub(n);
    distinct.into_iter().skip(skip).collect()
}

/// Restricts facts to `dates`, normalizes fund names and drops duplicates.
///
/// Duplicates share log date, fund, category and item after normalization;
/// the first one supplied is kept. Input order is otherwise preserved.
#[must_use]
pub fn prepare_window(facts: &[TemporalFact], dates: &[NaiveDate]) -> Vec<TemporalFact> {
    let wanted: HashSet<NaiveDate> = dates.iter().copied().collect();
    let mut seen: HashSet<(NaiveDate, FactKey)> = HashSet::new();
    let mut duplicates = 0usize;

    let prepared: Vec<TemporalFact> = facts
        .iter()
        .filter(|f| wanted.contains(&f.log_date))
        .filter_map(|f| {
            let mut fact = f.clone();
            fact.fund_name = normalize_fund_name(&fact.fund_name);
            if seen.insert((fact.log_date, fact.key())) {
                Some(fact)
            } else {
                duplicates += 1;
                None
            }
        })
        .collect();

    if duplicates > 0 {
        debug!(duplicates, "dropped duplicate facts");
    }
    prepared
}

/// Distinct fund names with holdings facts, normalized and sorted.
#[must_use]
pub fn fund_names(facts: &[TemporalFact]) -> Vec<String> {
    facts
        .iter()
        .filter(|f| f.category == Category::Holdings)
        .map(|f| normalize_fund_name(&f.fund_name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The most recent snapshots of a fact log, ready for diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotWindow {
    /// Log dates in the window, oldest first.
    pub dates: Vec<NaiveDate>,
    /// Funds with holdings facts anywhere in the log.
    pub funds: Vec<String>,
    /// Prepared facts within the window.
    pub facts: Vec<TemporalFact>,
}

impl SnapshotWindow {
    /// Selects the latest `config.snapshots_to_compare` snapshots.
    #[must_use]
    pub fn latest(facts: &[TemporalFact], config: &HistoryConfig) -> Self {
        let dates = latest_dates(facts, config.snapshots_to_compare);
        let funds = fund_names(facts);
        let facts = prepare_window(facts, &dates);
        debug!(
            dates = dates.len(),
            funds = funds.len(),
            facts = facts.len(),
            "selected snapshot window"
        );
        Self { dates, funds, facts }
    }

    /// True when the log has no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Runs the diff engine over the window.
    #[must_use]
    pub fn changes(&self) -> Vec<FactChange> {
        compute_diffs(&self.dates, &self.facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn fact(d: u32, fund: &str, item: &str, pct: f64) -> TemporalFact {
        TemporalFact::new(date(d), Category::Holdings, fund, item, pct)
    }

    #[test]
    fn test_latest_dates() {
        let facts = vec![
            fact(3, "F", "A", 1.0),
            fact(1, "F", "A", 1.0),
            fact(5, "F", "A", 1.0),
            fact(3, "F", "B", 1.0),
            fact(4, "F", "A", 1.0),
        ];
        assert_eq!(latest_dates(&facts, 2), vec![date(4), date(5)]);
        assert_eq!(latest_dates(&facts, 10).len(), 4);
        assert!(latest_dates(&[], 4).is_empty());
    }

    #[test]
    fn test_prepare_window_dedups_after_normalizing() {
        let facts = vec![
            fact(1, "Fund \u{2013} A", "X", 1.0),
            fact(1, "Fund - A", "X", 9.0),
            fact(1, "Fund - A", "Y", 2.0),
            fact(2, "Fund - A", "X", 3.0),
        ];
        let prepared = prepare_window(&facts, &[date(1)]);
        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].fund_name, "Fund - A");
        assert_eq!(prepared[0].percentage, Some(1.0));
    }

    #[test]
    fn test_fund_names() {
        let facts = vec![
            fact(1, "Zeta", "X", 1.0),
            fact(1, "Alpha \u{2014} B", "X", 1.0),
            fact(1, "Alpha - B", "X", 1.0),
            TemporalFact::new(date(1), Category::Sectors, "Sector Only", "Tech", 5.0),
        ];
        assert_eq!(fund_names(&facts), vec!["Alpha - B", "Zeta"]);
    }

    #[test]
    fn test_snapshot_window() {
        let facts = vec![
            fact(1, "F", "A", 1.0),
            fact(2, "F", "A", 2.0),
            fact(3, "F", "A", 3.0),
        ];
        let window = SnapshotWindow::latest(&facts, &HistoryConfig::new().with_snapshots(2));
        assert_eq!(window.dates, vec![date(2), date(3)]);
        assert_eq!(window.facts.len(), 2);
        assert!(!window.is_empty());
        assert_eq!(window.changes().len(), 2);
    }
}
