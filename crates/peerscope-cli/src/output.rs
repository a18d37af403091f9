//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Resolved output settings for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and informational messages.
    pub quiet: bool,
    /// Decimal places for weights.
    pub precision: usize,
}

impl Printer {
    /// Creates a printer.
    pub fn new(format: OutputFormat, quiet: bool, precision: usize) -> Self {
        Self {
            format,
            quiet,
            precision,
        }
    }

    /// True when results should be printed as one JSON document.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a full result as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, data: &T) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(data)?);
        Ok(())
    }

    /// Prints one titled block of rows as a table or CSV.
    ///
    /// CSV sections are separated by a blank line.
    pub fn section<T: Serialize + Tabled>(&self, title: &str, rows: &[T]) -> CliResult<()> {
        match self.format {
            OutputFormat::Table => {
                if !self.quiet {
                    print_header(title);
                }
                print_table(rows);
            }
            OutputFormat::Csv => {
                print_csv(rows)?;
                println!();
            }
            OutputFormat::Json => self.json(rows)?,
        }
        Ok(())
    }

    /// Formats a weight with the configured precision.
    pub fn weight(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.precision)
    }

    /// Formats an optional weight, `-` when absent.
    pub fn opt_weight(&self, value: Option<f64>) -> String {
        value.map_or_else(|| "-".to_string(), |v| self.weight(v))
    }

    /// Formats a signed weight change.
    pub fn signed(&self, value: Option<f64>) -> String {
        value.map_or_else(String::new, |v| format!("{:+.prec$}", v, prec = self.precision))
    }

    /// Prints an informational message for table output unless quiet.
    pub fn info(&self, message: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            print_info(message);
        }
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats an optional label, `-` when absent.
pub fn label(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
