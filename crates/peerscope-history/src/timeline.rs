//! Per-fund view of a diffed window.

use crate::diff::FactChange;
use crate::marker::ChangeMarker;
use chrono::NaiveDate;
use peerscope_core::Category;
use serde::{Deserialize, Serialize};

/// One line of a timeline section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Company or sector name.
    pub item_name: String,
    /// Current percentage; `None` for removed entries.
    pub percentage: Option<f64>,
    /// Change since the previous snapshot.
    pub diff: Option<f64>,
    /// Display marker.
    pub marker: ChangeMarker,
}

/// Entries of one fund for one date and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSection {
    /// Snapshot date.
    pub log_date: NaiveDate,
    /// Holdings or sectors.
    pub category: Category,
    /// First as-of date seen among the entries.
    pub data_date: Option<NaiveDate>,
    /// Entries by percentage descending, removed entries last.
    pub entries: Vec<TimelineEntry>,
}

/// All sections of one fund, date by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundTimeline {
    /// Fund name.
    pub fund_name: String,
    /// Sections ordered by date, then category.
    pub sections: Vec<TimelineSection>,
}

impl FundTimeline {
    /// Returns the section for a date and category.
    #[must_use]
    pub fn section(&self, log_date: NaiveDate, category: Category) -> Option<&TimelineSection> {
        self.sections
            .iter()
            .find(|s| s.log_date == log_date && s.category == category)
    }
}

/// Groups changes into one timeline per fund.
///
/// Every fund gets a section for every date and category, empty when nothing
/// was recorded.
#[must_use]
pub fn fund_timeline(
    changes: &[FactChange],
    dates: &[NaiveDate],
    funds: &[String],
) -> Vec<FundTimeline> {
    funds
        .iter()
        .map(|fund| FundTimeline {
            fund_name: fund.clone(),
            sections: dates
                .iter()
                .enumerate()
                .flat_map(|(i, date)| {
                    Category::ALL
                        .into_iter()
                        .map(move |category| section(changes, fund, *date, category, i == 0))
                })
                .collect(),
        })
        .collect()
}

fn section(
    changes: &[FactChange],
    fund: &str,
    log_date: NaiveDate,
    category: Category,
    is_first_date: bool,
) -> TimelineSection {
    let selected: Vec<&FactChange> = changes
        .iter()
        .filter(|c| c.fund_name == fund && c.log_date == log_date && c.category == category)
        .collect();

    let (mut regular, removed): (Vec<&FactChange>, Vec<&FactChange>) =
        selected.into_iter().partition(|c| !c.is_removed);
    regular.sort_by(|a, b| {
        let a = a.percentage.unwrap_or(f64::NEG_INFINITY);
        let b = b.percentage.unwrap_or(f64::NEG_INFINITY);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });

    let ordered: Vec<&FactChange> = regular.into_iter().chain(removed).collect();
    TimelineSection {
        log_date,
        category,
        data_date: ordered.iter().find_map(|c| c.date_of_data),
        entries: ordered
            .iter()
            .map(|c| TimelineEntry {
                item_name: c.item_name.clone(),
                percentage: c.percentage,
                diff: c.diff,
                marker: c.marker(is_first_date),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_diffs;
    use peerscope_core::TemporalFact;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_timeline_ordering_and_markers() {
        let facts = vec![
            TemporalFact::new(date(1), Category::Holdings, "F", "A", 5.0),
            TemporalFact::new(date(1), Category::Holdings, "F", "B", 3.0),
            TemporalFact::new(date(2), Category::Holdings, "F", "A", 2.0)
                .with_date_of_data(date(1)),
            TemporalFact::new(date(2), Category::Holdings, "F", "C", 4.0),
            TemporalFact::new(date(2), Category::Sectors, "F", "Tech", 60.0),
        ];
        let dates = [date(1), date(2)];
        let changes = compute_diffs(&dates, &facts);
        let timelines = fund_timeline(&changes, &dates, &["F".to_string()]);

        assert_eq!(timelines.len(), 1);
        let timeline = &timelines[0];
        assert_eq!(timeline.sections.len(), 4);

        let first = timeline.section(date(1), Category::Holdings).unwrap();
        assert!(first.entries.iter().all(|e| e.marker == ChangeMarker::None));
        assert!(timeline.section(date(1), Category::Sectors).unwrap().entries.is_empty());

        let second = timeline.section(date(2), Category::Holdings).unwrap();
        let names: Vec<_> = second.entries.iter().map(|e| e.item_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(second.entries[0].marker, ChangeMarker::New);
        assert_eq!(second.entries[1].marker, ChangeMarker::None);
        assert_eq!(second.entries[2].marker, ChangeMarker::Removed);
        assert_eq!(second.data_date, Some(date(1)));

        // sector seen for the first time on a later date
        let sectors = timeline.section(date(2), Category::Sectors).unwrap();
        assert_eq!(sectors.entries[0].marker, ChangeMarker::New);
    }
}
