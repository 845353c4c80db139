//! Machine-readable day rows.
//!
//! Decimals are written with their exact scale, so a row can be parsed back
//! into the same values. Fields go through [`csv::Writer`], which quotes any
//! bucket name containing a delimiter or quote.

use csv::{Terminator, Writer, WriterBuilder};
use std::io::{self, Write};
use tape_core::{BucketDefinition, DaySummary, Error, Result};

/// Placeholder columns written for a day without trades.
const EMPTY_DAY_COLUMNS: usize = 15;

/// CSV writer producing `\n`-terminated rows with no implicit header.
pub fn csv_writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// Header fields: configured column names, then one column per bucket.
pub fn header_record<S: AsRef<str>>(columns: &[S], buckets: &[BucketDefinition]) -> Vec<String> {
    columns
        .iter()
        .map(|c| c.as_ref().to_string())
        .chain(buckets.iter().map(|b| b.name.clone()))
        .collect()
}

/// Day fields, bucket dollar volumes appended in definition order.
pub fn day_record(day: &DaySummary) -> Vec<String> {
    let mut fields: Vec<String> = vec![day.ordinal.to_string(), day.date.clone()];

    if day.is_empty() {
        fields.extend(std::iter::repeat("0".to_string()).take(EMPTY_DAY_COLUMNS));
        return fields;
    }

    let totals = &day.totals;
    let ratios = &day.ratios;
    fields.extend(
        [
            day.average_price,
            totals.volume,
            totals.buy_volume,
            totals.sell_volume,
            totals.unknown_volume,
            totals.dollar_volume,
            totals.buy_dollar_volume,
            totals.sell_dollar_volume,
            totals.unknown_dollar_volume,
            ratios.buy_volume,
            ratios.sell_volume,
            ratios.unknown_volume,
            ratios.buy_dollar_volume,
            ratios.sell_dollar_volume,
            ratios.unknown_dollar_volume,
        ]
        .iter()
        .map(|v| v.to_string()),
    );
    fields.extend(day.buckets.iter().map(|b| b.dollar_volume.to_string()));
    fields
}

/// Write the header row.
pub fn write_csv_header<W: Write, S: AsRef<str>>(
    writer: &mut Writer<W>,
    columns: &[S],
    buckets: &[BucketDefinition],
) -> Result<()> {
    writer.write_record(header_record(columns, buckets))?;
    Ok(())
}

/// Write one day row.
pub fn write_day_csv<W: Write>(writer: &mut Writer<W>, day: &DaySummary) -> Result<()> {
    writer.write_record(day_record(day))?;
    Ok(())
}

/// Header row as text, without the line terminator.
pub fn csv_header<S: AsRef<str>>(columns: &[S], buckets: &[BucketDefinition]) -> Result<String> {
    record_to_string(&header_record(columns, buckets))
}

/// Day row as text, without the line terminator.
pub fn format_day_csv(day: &DaySummary) -> Result<String> {
    record_to_string(&day_record(day))
}

fn record_to_string(fields: &[String]) -> Result<String> {
    let mut writer = csv_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    let mut row =
        String::from_utf8(bytes).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    if row.ends_with('\n') {
        row.pop();
    }
    Ok(row)
}
