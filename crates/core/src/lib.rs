//! Core types and configuration for the tape-sentiment system.
//!
//! This crate provides shared types used across all other crates:
//! - Trade records and sentiment classification
//! - Price bucket definitions
//! - Aggregate snapshots (volume totals, day and month summaries)
//! - Per-ticker configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod math;
pub mod types;

pub use config::{DateSource, TickerConfig};
pub use error::{Error, Result};
pub use types::*;
