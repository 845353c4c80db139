//! Trade aggregation for the tape-sentiment system.
//!
//! This crate handles:
//! - Price bucket accumulation
//! - Per-day trade collection and sentiment totals
//! - Month-level folding of day totals

pub mod bucket;
pub mod day;
pub mod month;

pub use bucket::PriceBucket;
pub use day::{ProcessStats, TradeDay};
pub use month::MonthAccumulator;
