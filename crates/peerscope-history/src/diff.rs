//! Snapshot-to-snapshot change detection.

use crate::marker::ChangeMarker;
use chrono::NaiveDate;
use peerscope_core::{Category, TemporalFact};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A fact annotated with its change against the previous snapshot.
///
/// Removals appear as synthesized rows dated at the snapshot where the entry
/// disappeared, with no percentage and the last known value in
/// `prev_percentage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactChange {
    /// Snapshot date.
    pub log_date: NaiveDate,
    /// Holdings or sectors.
    pub category: Category,
    /// Fund name.
    pub fund_name: String,
    /// Company or sector name.
    pub item_name: String,
    /// Current percentage; `None` on removed rows.
    pub percentage: Option<f64>,
    /// Percentage at the previous snapshot.
    pub prev_percentage: Option<f64>,
    /// `percentage - prev_percentage` rounded to 2 decimals.
    pub diff: Option<f64>,
    /// Absent at the previous snapshot.
    pub is_new: bool,
    /// Synthesized removal row.
    pub is_removed: bool,
    /// New, but present two snapshots back.
    pub is_returning: bool,
    /// As-of date of the underlying data.
    pub date_of_data: Option<NaiveDate>,
    /// Source page.
    pub source_url: String,
}

impl FactChange {
    fn baseline(fact: &TemporalFact) -> Self {
        Self {
            log_date: fact.log_date,
            category: fact.category,
            fund_name: fact.fund_name.clone(),
            item_name: fact.item_name.clone(),
            percentage: fact.percentage,
            prev_percentage: None,
            diff: None,
            is_new: false,
            is_removed: false,
            is_returning: false,
            date_of_data: fact.date_of_data,
            source_url: fact.source_url.clone(),
        }
    }

    fn removed(previous: &TemporalFact, log_date: NaiveDate) -> Self {
        Self {
            log_date,
            percentage: None,
            prev_percentage: previous.percentage,
            is_removed: true,
            ..Self::baseline(previous)
        }
    }

    /// Display marker; `is_first_date` forces [`ChangeMarker::None`].
    #[must_use]
    pub fn marker(&self, is_first_date: bool) -> ChangeMarker {
        ChangeMarker::classify(self, is_first_date)
    }
}

type Key<'a> = (&'a str, Category, &'a str);

fn key_of(fact: &TemporalFact) -> Key<'_> {
    (fact.fund_name.as_str(), fact.category, fact.item_name.as_str())
}

/// Compares each snapshot with the one before it.
///
/// `dates` is ordered oldest first and `facts` is deduplicated per date (see
/// [`crate::prepare_window`]). The first date is a baseline with no deltas.
/// For every later date each fact is joined to the previous date on
/// (fund, category, item):
///
/// - facts without a previous percentage are new (an unmatched key or a
///   previous removal row), and returning if the key existed two dates back
/// - keys of the previous date missing now produce one removal row each
///
/// Output is each date's facts in input order followed by that date's removal
/// rows in previous-date order. Facts dated outside `dates` are ignored.
#[must_use]
pub fn compute_diffs(dates: &[NaiveDate], facts: &[TemporalFact]) -> Vec<FactChange> {
    let mut by_date: HashMap<NaiveDate, Vec<&TemporalFact>> = HashMap::new();
    for fact in facts {
        by_date.entry(fact.log_date).or_default().push(fact);
    }

    let mut changes = Vec::with_capacity(facts.len());
    for (i, date) in dates.iter().enumerate() {
        let current = snapshot(&by_date, date);
        if i == 0 {
            changes.extend(current.iter().map(|f| FactChange::baseline(f)));
            continue;
        }

        let previous = snapshot(&by_date, &dates[i - 1]);
        let mut prev_by_key: HashMap<Key<'_>, &TemporalFact> = HashMap::new();
        for &fact in previous {
            prev_by_key.entry(key_of(fact)).or_insert(fact);
        }
        let two_back: HashSet<Key<'_>> = if i >= 2 {
            snapshot(&by_date, &dates[i - 2]).iter().map(|f| key_of(f)).collect()
        } else {
            HashSet::new()
        };

        for &fact in current {
            let key = key_of(fact);
            let matched = prev_by_key.get(&key);
            let prev_percentage = matched.and_then(|p| p.percentage);
            let diff = match (fact.percentage, prev_percentage) {
                (Some(cur), Some(prev)) => Some(round2(cur - prev)),
                _ => None,
            };
            let is_new = prev_percentage.is_none();
            changes.push(FactChange {
                prev_percentage,
                diff,
                is_new,
                is_returning: is_new && two_back.contains(&key),
                ..FactChange::baseline(fact)
            });
        }

        let current_keys: HashSet<Key<'_>> = current.iter().map(|f| key_of(f)).collect();
        let mut emitted: HashSet<Key<'_>> = HashSet::new();
        let mut removed = 0usize;
        for &fact in previous {
            let key = key_of(fact);
            if !current_keys.contains(&key) && emitted.insert(key) {
                changes.push(FactChange::removed(fact, *date));
                removed += 1;
            }
        }
        debug!(%date, facts = current.len(), removed, "diffed snapshot");
    }
    changes
}

fn snapshot<'m, 'f>(
    by_date: &'m HashMap<NaiveDate, Vec<&'f TemporalFact>>,
    date: &NaiveDate,
) -> &'m [&'f TemporalFact] {
    by_date.get(date).map(Vec::as_slice).unwrap_or(&[])
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn fact(d: u32, item: &str, pct: f64) -> TemporalFact {
        TemporalFact::new(date(d), Category::Holdings, "F", item, pct)
    }

    #[test]
    fn test_baseline_has_no_deltas() {
        let facts = vec![fact(1, "A", 5.0), fact(1, "B", 3.0)];
        let changes = compute_diffs(&[date(1)], &facts);
        assert_eq!(changes.len(), 2);
        for c in &changes {
            assert_eq!(c.diff, None);
            assert_eq!(c.prev_percentage, None);
            assert!(!c.is_new && !c.is_removed && !c.is_returning);
        }
    }

    #[test]
    fn test_diff_and_new() {
        let facts = vec![fact(1, "A", 5.0), fact(2, "A", 5.5), fact(2, "B", 1.0)];
        let changes = compute_diffs(&[date(1), date(2)], &facts);
        let a = &changes[1];
        assert_eq!(a.prev_percentage, Some(5.0));
        assert_relative_eq!(a.diff.unwrap(), 0.5);
        assert!(!a.is_new);

        let b = &changes[2];
        assert!(b.is_new);
        assert!(!b.is_returning);
        assert_eq!(b.diff, None);
    }

    #[test]
    fn test_diff_rounded_to_two_decimals() {
        let facts = vec![fact(1, "A", 1.1), fact(2, "A", 1.3)];
        let changes = compute_diffs(&[date(1), date(2)], &facts);
        assert_eq!(changes[1].diff, Some(0.2));
    }

    #[test]
    fn test_removed_row_synthesized() {
        let facts = vec![
            fact(1, "X", 5.0)
                .with_date_of_data(date(1))
                .with_source_url("https://example.com/f"),
        ];
        let changes = compute_diffs(&[date(1), date(2)], &facts);
        assert_eq!(changes.len(), 2);
        let removed = &changes[1];
        assert_eq!(removed.log_date, date(2));
        assert_eq!(removed.item_name, "X");
        assert_eq!(removed.percentage, None);
        assert_eq!(removed.prev_percentage, Some(5.0));
        assert_eq!(removed.diff, None);
        assert!(removed.is_removed && !removed.is_new && !removed.is_returning);
        assert_eq!(removed.date_of_data, Some(date(1)));
        assert_eq!(removed.source_url, "https://example.com/f");
    }

    #[test]
    fn test_returning() {
        let facts = vec![fact(1, "K", 3.0), fact(2, "Other", 1.0), fact(3, "K", 4.0)];
        let changes = compute_diffs(&[date(1), date(2), date(3)], &facts);
        let k = changes
            .iter()
            .find(|c| c.log_date == date(3) && c.item_name == "K")
            .unwrap();
        assert!(k.is_new);
        assert!(k.is_returning);
        assert_eq!(k.diff, None);
        assert_eq!(k.prev_percentage, None);
    }

    #[test]
    fn test_null_previous_percentage_counts_as_new() {
        let mut gone = fact(2, "X", 0.0);
        gone.percentage = None;
        let facts = vec![fact(1, "X", 3.0), gone, fact(3, "X", 4.0)];
        let changes = compute_diffs(&[date(1), date(2), date(3)], &facts);

        let x = changes.iter().find(|c| c.log_date == date(3)).unwrap();
        assert_eq!(x.prev_percentage, None);
        assert_eq!(x.diff, None);
        assert!(x.is_new);
        assert!(x.is_returning);
        assert_eq!(x.marker(false), ChangeMarker::Returning);
    }

    #[test]
    fn test_keys_include_fund_and_category() {
        let facts = vec![
            fact(1, "A", 1.0),
            TemporalFact::new(date(2), Category::Sectors, "F", "A", 1.0),
        ];
        let changes = compute_diffs(&[date(1), date(2)], &facts);
        assert!(changes[1].is_new);
        assert!(changes[2].is_removed);
        assert_eq!(changes[2].category, Category::Holdings);
    }

    #[test]
    fn test_empty_dates() {
        assert!(compute_diffs(&[], &[fact(1, "A", 1.0)]).is_empty());
    }
}
