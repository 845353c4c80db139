//! Configuration structures for the tape-sentiment system.
//!
//! One [`TickerConfig`] is loaded per ticker directory and passed by
//! reference to everything that needs it.

use crate::error::{Error, Result};
use crate::math::MAX_MATH_SCALE;
use crate::types::BucketDefinition;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the per-ticker configuration.
pub const CONFIG_FILE_NAME: &str = "tape.json";

/// Where a day's date key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// First 8 characters of the input file name.
    #[default]
    FileName,
    /// The preamble line at `date_line_number`.
    HeaderLine,
}

/// Per-ticker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Ticker symbol, used to name the CSV output.
    pub ticker: String,
    /// Vendor preamble lines to skip at the top of every input file.
    #[serde(default = "default_header_skip_lines")]
    pub header_skip_lines: usize,
    /// 0-based preamble line holding the date (header-line strategy only).
    #[serde(default = "default_date_line_number")]
    pub date_line_number: usize,
    /// Date key strategy.
    #[serde(default)]
    pub date_source: DateSource,
    /// Decimal places for average prices.
    #[serde(default = "default_math_scale")]
    pub math_scale: u32,
    /// Leading column names of the CSV output header.
    #[serde(default = "default_output_header")]
    pub output_header: Vec<String>,
    /// Price buckets, in output column order. Optional.
    #[serde(default)]
    pub buckets: Vec<BucketDefinition>,
}

fn default_header_skip_lines() -> usize {
    9
}

fn default_date_line_number() -> usize {
    2
}

fn default_math_scale() -> u32 {
    8
}

fn default_output_header() -> Vec<String> {
    [
        "Day",
        "Date",
        "Avg Price",
        "Volume",
        "Buy Volume",
        "Sell Volume",
        "Unknown Volume",
        "Dollar Volume",
        "Buy Dollar Volume",
        "Sell Dollar Volume",
        "Unknown Dollar Volume",
        "Buy Vol %",
        "Sell Vol %",
        "Unknown Vol %",
        "Buy Dollar Vol %",
        "Sell Dollar Vol %",
        "Unknown Dollar Vol %",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl TickerConfig {
    /// Create a configuration with defaults for everything but the ticker.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            header_skip_lines: default_header_skip_lines(),
            date_line_number: default_date_line_number(),
            date_source: DateSource::default(),
            math_scale: default_math_scale(),
            output_header: default_output_header(),
            buckets: Vec::new(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TickerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `tape.json` from a ticker directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        let json = std::fs::read_to_string(&path).map_err(|e| {
            Error::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            ticker = %config.ticker,
            buckets = config.buckets.len(),
            path = %path.display(),
            "Loaded ticker configuration"
        );
        Ok(config)
    }

    /// Check required values and cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.ticker.trim().is_empty() {
            return Err(Error::config("ticker must not be empty"));
        }
        if self.math_scale > MAX_MATH_SCALE {
            return Err(Error::config(format!(
                "math_scale {} exceeds the maximum of {}",
                self.math_scale, MAX_MATH_SCALE
            )));
        }
        if self.date_source == DateSource::HeaderLine
            && self.date_line_number >= self.header_skip_lines
        {
            return Err(Error::config(format!(
                "date_line_number {} is outside the {} skipped header lines",
                self.date_line_number, self.header_skip_lines
            )));
        }
        for bucket in &self.buckets {
            if bucket.name.trim().is_empty() {
                return Err(Error::config("bucket name must not be empty"));
            }
            if bucket.min > bucket.max {
                tracing::warn!(bucket = %bucket, "Bucket min exceeds max; it will never accept a trade");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundaryMode;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = TickerConfig::from_json_str(r#"{ "ticker": "GWRE" }"#).unwrap();
        assert_eq!(config.header_skip_lines, 9);
        assert_eq!(config.date_line_number, 2);
        assert_eq!(config.math_scale, 8);
        assert_eq!(config.date_source, DateSource::FileName);
        assert_eq!(config.output_header.len(), 17);
        assert!(config.buckets.is_empty());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "ticker": "GWRE",
            "header_skip_lines": 7,
            "date_line_number": 1,
            "date_source": "header_line",
            "math_scale": 6,
            "output_header": ["Day", "Date"],
            "buckets": [
                { "name": "0004", "min": "0.0004", "max": "0.0004", "boundary_mode": "inclusive" },
                { "name": "mid", "min": "0.0004", "max": "0.0006", "boundary_mode": "exclusive" },
                { "name": "any", "min": "0", "max": "1" }
            ]
        }"#;
        let config = TickerConfig::from_json_str(json).unwrap();

        assert_eq!(config.header_skip_lines, 7);
        assert_eq!(config.date_source, DateSource::HeaderLine);
        assert_eq!(config.math_scale, 6);
        assert_eq!(config.output_header, vec!["Day", "Date"]);
        assert_eq!(config.buckets.len(), 3);
        assert_eq!(config.buckets[0].min, Decimal::from_str("0.0004").unwrap());
        assert_eq!(config.buckets[1].boundary_mode, BoundaryMode::Exclusive);
        assert_eq!(config.buckets[2].boundary_mode, BoundaryMode::Inclusive);
    }

    #[test]
    fn test_missing_ticker_fails() {
        assert!(matches!(
            TickerConfig::from_json_str(r#"{ "math_scale": 8 }"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            TickerConfig::from_json_str(r#"{ "ticker": "  " }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_scale_limit() {
        let json = r#"{ "ticker": "X", "math_scale": 29 }"#;
        assert!(matches!(TickerConfig::from_json_str(json), Err(Error::Config(_))));
    }

    #[test]
    fn test_header_date_line_must_be_in_preamble() {
        let json = r#"{ "ticker": "X", "date_source": "header_line", "header_skip_lines": 2, "date_line_number": 2 }"#;
        assert!(matches!(TickerConfig::from_json_str(json), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "ticker": "ABC" }"#).unwrap();

        let config = TickerConfig::load(dir.path()).unwrap();
        assert_eq!(config.ticker, "ABC");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(TickerConfig::load(dir.path()), Err(Error::Config(_))));
    }
}
