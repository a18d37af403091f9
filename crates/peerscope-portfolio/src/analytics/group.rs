//! Insertion-ordered grouping used by the analytics.
//!
//! Keys iterate in first-seen order, which is what makes tie-breaking in
//! the stable sorts downstream follow input order.

use super::profile::WeightedItem;
use peerscope_core::EnrichedHolding;
use std::collections::HashMap;

/// Values grouped by string key, iterated in first-seen order.
#[derive(Debug, Clone)]
pub(crate) struct Grouped<'k, V> {
    order: Vec<&'k str>,
    index: HashMap<&'k str, usize>,
    values: Vec<V>,
}

impl<'k, V: Default> Grouped<'k, V> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Returns the value for `key`, inserting a default on first sight.
    pub(crate) fn entry(&mut self, key: &'k str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.values.len();
                self.order.push(key);
                self.index.insert(key, idx);
                self.values.push(V::default());
                idx
            }
        };
        &mut self.values[idx]
    }
}

impl<'k, V> Grouped<'k, V> {
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.values[idx])
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &'k str> + '_ {
        self.order.iter().copied()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'k str, &V)> + '_ {
        self.order.iter().copied().zip(self.values.iter())
    }
}

/// Sums weights per ticker.
pub(crate) fn weight_by_ticker<'a>(rows: &[&'a EnrichedHolding]) -> Grouped<'a, f64> {
    let mut grouped = Grouped::new();
    for row in rows {
        *grouped.entry(row.ticker.as_str()) += row.weight;
    }
    grouped
}

/// First non-empty descriptive fields seen for a ticker.
#[derive(Debug, Clone, Default)]
pub(crate) struct Descriptors {
    pub(crate) short_name: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) gics_sector: Option<String>,
}

impl Descriptors {
    pub(crate) fn fill_from(&mut self, row: &EnrichedHolding) {
        if self.short_name.is_none() {
            self.short_name.clone_from(&row.short_name);
        }
        if self.country.is_none() {
            self.country.clone_from(&row.country);
        }
        if self.gics_sector.is_none() {
            self.gics_sector.clone_from(&row.gics_sector);
        }
    }

    pub(crate) fn or(self, fallback: Option<&Descriptors>) -> Self {
        match fallback {
            Some(f) => Self {
                short_name: self.short_name.or_else(|| f.short_name.clone()),
                country: self.country.or_else(|| f.country.clone()),
                gics_sector: self.gics_sector.or_else(|| f.gics_sector.clone()),
            },
            None => self,
        }
    }
}

/// Collects descriptive fields per ticker.
pub(crate) fn descriptors_by_ticker<'a>(rows: &[&'a EnrichedHolding]) -> Grouped<'a, Descriptors> {
    let mut grouped: Grouped<'a, Descriptors> = Grouped::new();
    for row in rows {
        grouped.entry(row.ticker.as_str()).fill_from(row);
    }
    grouped
}

/// Sums weights per label, skipping missing labels, weight-descending.
pub(crate) fn breakdown<'a>(
    items: impl IntoIterator<Item = (Option<&'a str>, f64)>,
) -> Vec<WeightedItem> {
    let mut grouped: Grouped<'a, f64> = Grouped::new();
    for (label, weight) in items {
        if let Some(label) = label {
            *grouped.entry(label) += weight;
        }
    }
    let mut result: Vec<WeightedItem> = grouped
        .iter()
        .map(|(name, weight)| WeightedItem {
            name: name.to_string(),
            weight: *weight,
        })
        .collect();
    sort_by_weight_desc(&mut result, |item| item.weight);
    result
}

/// Stable sort, largest weight first.
pub(crate) fn sort_by_weight_desc<T>(items: &mut [T], weight: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        weight(b)
            .partial_cmp(&weight(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut g: Grouped<'_, usize> = Grouped::new();
        *g.entry("b") += 1;
        *g.entry("a") += 1;
        *g.entry("b") += 1;
        let items: Vec<_> = g.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(items, vec![("b", 2), ("a", 1)]);
        assert_eq!(g.len(), 2);
        assert!(g.contains("a"));
        assert_eq!(g.get("c"), None);
    }

    #[test]
    fn test_weight_by_ticker_sums_duplicates() {
        let rows = [
            EnrichedHolding::new("F", "A", 1.0),
            EnrichedHolding::new("F", "B", 2.0),
            EnrichedHolding::new("F", "A", 0.5),
        ];
        let refs: Vec<&EnrichedHolding> = rows.iter().collect();
        let w = weight_by_ticker(&refs);
        assert_eq!(w.get("A"), Some(&1.5));
        assert_eq!(w.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_descriptors_skip_missing() {
        let rows = [
            EnrichedHolding::new("F", "A", 1.0),
            EnrichedHolding::new("G", "A", 1.0).with_short_name("A Co"),
            EnrichedHolding::new("H", "A", 1.0).with_short_name("Other"),
        ];
        let refs: Vec<&EnrichedHolding> = rows.iter().collect();
        let d = descriptors_by_ticker(&refs);
        assert_eq!(d.get("A").unwrap().short_name.as_deref(), Some("A Co"));
    }
}
