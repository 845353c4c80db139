//! Command-line driver for the tape-sentiment system.
//!
//! This crate handles:
//! - Argument parsing
//! - Logging setup
//! - Walking ticker directories and writing their reports

pub mod cli;
pub mod logging;
pub mod runner;

pub use cli::Cli;
pub use logging::setup_logging;
pub use runner::{process_ticker, run, TickerReport, SUMMARY_FILE_NAME};
