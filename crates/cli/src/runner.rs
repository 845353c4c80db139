//! Ticker directory processing.
//!
//! For each ticker directory: load `tape.json`, read the daily exports in file
//! name order, and write `<TICKER>.csv` plus `summary.txt` next to them.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tape_aggregation::{MonthAccumulator, TradeDay};
use tape_core::{MonthSummary, TickerConfig};
use tape_ingestion::{day_files, resolve_date, ticker_dirs, DayReader};
use tape_report::{csv_writer, format_month, write_csv_header, write_day_csv, ReportFormat};

/// Name of the human-readable report written to each ticker directory.
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

/// Outcome of processing one ticker directory.
#[derive(Debug, Clone)]
pub struct TickerReport {
    pub ticker: String,
    /// Export files found in `input/`.
    pub files: usize,
    /// Days skipped because no trades parsed.
    pub empty_days: usize,
    /// Lines that failed to parse, over all days.
    pub rejected_lines: usize,
    /// Days left out because the period totals could not hold them.
    pub overflow_days: usize,
    pub csv_path: PathBuf,
    pub summary_path: PathBuf,
    pub month: MonthSummary,
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}

/// Process every selected ticker directory under `home`.
pub fn run(home: &Path, only: &[String]) -> Result<Vec<TickerReport>> {
    let dirs = ticker_dirs(home, only)
        .with_context(|| format!("listing ticker directories in {}", home.display()))?;

    if dirs.is_empty() {
        tracing::warn!(home = %home.display(), "No ticker directories found");
    }

    let mut reports = Vec::with_capacity(dirs.len());
    for dir in dirs {
        reports.push(process_ticker(&dir)?);
    }
    Ok(reports)
}

/// Process one ticker directory.
pub fn process_ticker(dir: &Path) -> Result<TickerReport> {
    let config = TickerConfig::load(dir)
        .with_context(|| format!("loading config for {}", dir.display()))?;

    let span = tracing::info_span!("ticker", ticker = %config.ticker);
    let _enter = span.enter();
    tracing::info!(dir = %dir.display(), buckets = config.buckets.len(), "Processing ticker");

    let csv_path = dir.join(format!("{}.csv", config.ticker));
    let summary_path = dir.join(SUMMARY_FILE_NAME);
    let mut csv_out = csv_writer(create_output(&csv_path)?);
    let mut summary_out = BufWriter::new(create_output(&summary_path)?);

    write_csv_header(&mut csv_out, &config.output_header, &config.buckets)
        .with_context(|| format!("writing {}", csv_path.display()))?;

    let files = day_files(dir).with_context(|| format!("listing input of {}", dir.display()))?;
    let mut month = MonthAccumulator::new(config.math_scale);
    let mut ordinal = 0u32;
    let mut empty_days = 0;
    let mut rejected_lines = 0;
    let mut overflow_days = 0;

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut reader = DayReader::open(path, &config)
            .with_context(|| format!("opening {}", path.display()))?;
        let date = resolve_date(&config, &file_name, reader.header_date());
        tracing::debug!(file = %file_name, date = %date, "Reading day");

        let mut day = TradeDay::new(date, &config.buckets, config.math_scale);
        let stats = day.process(&mut reader);
        rejected_lines += stats.lines_rejected;

        if day.is_empty() {
            empty_days += 1;
            tracing::info!(file = %file_name, date = day.date(), "No trades, skipping day");
            continue;
        }

        if let Err(e) = month.add_day(&day) {
            overflow_days += 1;
            tracing::warn!(file = %file_name, date = day.date(), "Skipping day: {}", e);
            continue;
        }
        ordinal += 1;
        day.set_day_ordinal(ordinal);

        let summary = day.summary();
        write_day_csv(&mut csv_out, &summary)
            .with_context(|| format!("writing {}", csv_path.display()))?;
        writeln!(summary_out, "{}", ReportFormat::Tabular.format_day(&summary)?)
            .with_context(|| format!("writing {}", summary_path.display()))?;

        tracing::info!(
            day = ordinal,
            date = day.date(),
            trades = summary.trade_count,
            rejected = stats.lines_rejected,
            vwap = %summary.average_price,
            "Day complete"
        );
    }

    let month_summary = month.summary();
    writeln!(summary_out, "{}", format_month(&month_summary))
        .with_context(|| format!("writing {}", summary_path.display()))?;

    csv_out
        .flush()
        .with_context(|| format!("writing {}", csv_path.display()))?;
    summary_out
        .flush()
        .with_context(|| format!("writing {}", summary_path.display()))?;

    tracing::info!(
        days = month_summary.days,
        empty_days,
        overflow_days,
        vwap = %month_summary.average_price,
        "Ticker complete"
    );

    Ok(TickerReport {
        ticker: config.ticker,
        files: files.len(),
        empty_days,
        rejected_lines,
        overflow_days,
        csv_path,
        summary_path,
        month: month_summary,
    })
}
