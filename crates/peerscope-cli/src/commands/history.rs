//! History command implementation.
//!
//! Diffs the most recent snapshots of a fact log, either as one combined
//! change stream or as a per-fund timeline.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;
use tracing::info;

use peerscope_core::names::normalize_fund_name;
use peerscope_ext_file::load_facts;
use peerscope_history::{fund_timeline, FundTimeline, HistoryConfig, SnapshotWindow};

use crate::error::{CliError, CliResult};
use crate::output::{print_warning, Printer};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Fact log CSV (log_date,category,fund_name,item_name,percentage,date_of_data,source_url)
    #[arg(long)]
    pub facts: PathBuf,

    /// Number of most recent log dates to compare (overrides config)
    #[arg(short = 'n', long)]
    pub snapshots: Option<usize>,

    /// Show the timeline of one fund
    #[arg(long)]
    pub fund: Option<String>,

    /// Only show rows that are new, removed, returning or changed
    #[arg(long)]
    pub changes_only: bool,
}

/// Execute the history command.
pub fn execute(args: HistoryArgs, config: &HistoryConfig, printer: Printer) -> CliResult<()> {
    let mut config = config.clone();
    if let Some(n) = args.snapshots {
        config = config.with_snapshots(n);
    }
    config.validate()?;

    let facts = load_facts(&args.facts)?;
    let window = SnapshotWindow::latest(&facts, &config);
    if window.is_empty() {
        print_warning(&format!("No facts found in {}", args.facts.display()));
    }
    info!(
        dates = window.dates.len(),
        funds = window.funds.len(),
        facts = window.facts.len(),
        "Comparing snapshots"
    );

    match &args.fund {
        Some(name) => timeline(&window, name, args.changes_only, printer),
        None => stream(&window, args.changes_only, printer),
    }
}

fn stream(window: &SnapshotWindow, changes_only: bool, printer: Printer) -> CliResult<()> {
    let first = window.dates.first().copied();
    let changes: Vec<_> = window
        .changes()
        .into_iter()
        .filter(|c| {
            !changes_only
                || c.is_new
                || c.is_removed
                || c.diff.is_some_and(|d| d != 0.0)
        })
        .collect();
    if printer.is_json() {
        return printer.json(&changes);
    }

    let lines: Vec<ChangeLine> = changes
        .iter()
        .map(|c| ChangeLine {
            log_date: c.log_date.to_string(),
            category: c.category.to_string(),
            fund: c.fund_name.clone(),
            item: c.item_name.clone(),
            percentage: printer.opt_weight(c.percentage),
            previous: printer.opt_weight(c.prev_percentage),
            diff: printer.signed(c.diff),
            status: c.marker(Some(c.log_date) == first).as_str().to_string(),
        })
        .collect();
    printer.section("Fact Changes", &lines)
}

fn timeline(
    window: &SnapshotWindow,
    requested: &str,
    changes_only: bool,
    printer: Printer,
) -> CliResult<()> {
    let name = normalize_fund_name(requested);
    if !window.funds.contains(&name) {
        return Err(CliError::UnknownFund {
            name,
            known: window.funds.join(", "),
        });
    }

    let changes = window.changes();
    let mut timelines = fund_timeline(&changes, &window.dates, std::slice::from_ref(&name));
    let Some(mut timeline) = timelines.pop() else {
        return Ok(());
    };
    if changes_only {
        drop_unchanged(&mut timeline);
    }

    if printer.is_json() {
        return printer.json(&timeline);
    }

    let lines: Vec<TimelineLine> = timeline
        .sections
        .iter()
        .flat_map(|section| {
            section.entries.iter().map(move |e| TimelineLine {
                log_date: section.log_date.to_string(),
                category: section.category.to_string(),
                data_date: section
                    .data_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
                item: e.item_name.clone(),
                percentage: printer.opt_weight(e.percentage),
                diff: printer.signed(e.diff),
                status: e.marker.as_str().to_string(),
            })
        })
        .collect();
    printer.section(&timeline.fund_name, &lines)
}

fn drop_unchanged(timeline: &mut FundTimeline) {
    use peerscope_history::ChangeMarker;

    for section in &mut timeline.sections {
        section
            .entries
            .retain(|e| e.marker != ChangeMarker::None || e.diff.is_some_and(|d| d != 0.0));
    }
}

#[derive(Serialize, Tabled)]
struct ChangeLine {
    #[tabled(rename = "Date")]
    log_date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Change")]
    diff: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Serialize, Tabled)]
struct TimelineLine {
    #[tabled(rename = "Date")]
    log_date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Data As Of")]
    data_date: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "Change")]
    diff: String,
    #[tabled(rename = "Status")]
    status: String,
}
