//! Data ingestion for the tape-sentiment system.
//!
//! This crate handles:
//! - Ticker directory and daily export discovery
//! - Vendor preamble skipping and date-line capture
//! - Trade line parsing (quoted CSV to `TradeRecord`)
//! - End-of-data sentinel detection

pub mod discovery;
pub mod parser;
pub mod reader;

pub use discovery::{day_files, ticker_dirs};
pub use parser::{is_terminator, parse_trade_line};
pub use reader::{date_from_file_name, resolve_date, DayReader};
