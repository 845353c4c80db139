//! Report formatting for the tape-sentiment system.
//!
//! This crate handles:
//! - CSV day rows and the CSV header
//! - Tabular day and month blocks
//! - Share, dollar and percentage number formatting

pub mod csvfmt;
pub mod numfmt;
pub mod tabular;

pub use csvfmt::{csv_header, csv_writer, format_day_csv, write_csv_header, write_day_csv};
pub use tabular::{format_day_tabular, format_month_tabular};

use tape_core::{DaySummary, MonthSummary, Result};

/// Output representation of a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One comma-separated row.
    Csv,
    /// Labelled block for reading.
    Tabular,
}

impl ReportFormat {
    /// Render a day in this format.
    pub fn format_day(self, day: &DaySummary) -> Result<String> {
        match self {
            ReportFormat::Csv => format_day_csv(day),
            ReportFormat::Tabular => Ok(format_day_tabular(day)),
        }
    }
}

/// Render the closing period block.
pub fn format_month(month: &MonthSummary) -> String {
    format_month_tabular(month)
}
