//! Trade line parsing.
//!
//! Turns one exported CSV data line (`"time","price","size","bid","ask",...`)
//! into a [`TradeRecord`]. Price and size are mandatory; bid and ask fall back
//! to zero because after-hours and odd-lot prints often carry no quote.

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::str::FromStr;
use tape_core::{Error, Result, TradeRecord};

/// Trailing blank record the exporter writes after the last trade.
pub const TERMINATOR_ROW: &str = r#""","","","","","","","","","","#;

/// Whether a line is the blank record that ends the trade list.
#[inline]
pub fn is_terminator(line: &str) -> bool {
    line.starts_with(TERMINATOR_ROW)
}

fn parse_decimal(field: &str) -> Option<Decimal> {
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Split one line into trimmed fields, honouring CSV quoting.
fn read_record(line: &str) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|e| Error::parse(format!("malformed line: {}", e)))?;
    if !found {
        return Err(Error::parse("empty line"));
    }
    Ok(record)
}

/// Parse one data line into a trade record.
///
/// Fields past the fifth are ignored.
pub fn parse_trade_line(line: &str) -> Result<TradeRecord> {
    let record = read_record(line)?;

    let timestamp = record.get(0).ok_or_else(|| Error::parse("empty line"))?;

    let price_field = record
        .get(1)
        .ok_or_else(|| Error::parse("missing price field"))?;
    let price = parse_decimal(price_field)
        .ok_or_else(|| Error::parse(format!("invalid price '{}'", price_field)))?;

    let size_field = record
        .get(2)
        .ok_or_else(|| Error::parse("missing size field"))?;
    let size = parse_decimal(size_field)
        .ok_or_else(|| Error::parse(format!("invalid size '{}'", size_field)))?;

    let bid = quote_or_zero(record.get(3), "bid", line);
    let ask = quote_or_zero(record.get(4), "ask", line);

    TradeRecord::new(timestamp, price, size, bid, ask)
}

fn quote_or_zero(field: Option<&str>, label: &str, line: &str) -> Decimal {
    match field.and_then(parse_decimal) {
        Some(value) => value,
        None => {
            tracing::debug!(quote = label, data = line, "Trade has no {} info", label);
            Decimal::ZERO
        }
    }
}
