//! Core data types for the tape-sentiment system.

use crate::error::{Error, Result};
use crate::math::{self, PCT_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Inferred trade direction from price vs. the quoted bid/ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    /// Printed at or above the ask (buyer-initiated).
    Buy,
    /// Printed at or below the bid (seller-initiated).
    Sell,
    /// Between bid and ask, or quotes missing/degenerate.
    Unknown,
}

impl Sentiment {
    /// Classify a print against its bid/ask.
    ///
    /// A zero or locked quote (`bid == ask`) is unclassifiable. The bid test
    /// runs before the ask test.
    pub fn classify(price: Decimal, bid: Decimal, ask: Decimal) -> Self {
        if bid.is_zero() && ask.is_zero() {
            return Sentiment::Unknown;
        }
        if bid == ask {
            return Sentiment::Unknown;
        }
        if price <= bid {
            Sentiment::Sell
        } else if price >= ask {
            Sentiment::Buy
        } else {
            Sentiment::Unknown
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Buy => "BUY",
            Sentiment::Sell => "SELL",
            Sentiment::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// A single trade (print) from a daily export.
///
/// Equality and ordering look at the timestamp token only.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    /// Exchange-local time-of-day token, kept verbatim.
    timestamp: String,
    /// Trade price.
    price: Decimal,
    /// Trade size in shares.
    size: Decimal,
    /// Bid at the time of the print (zero when missing).
    bid: Decimal,
    /// Ask at the time of the print (zero when missing).
    ask: Decimal,
    /// `price * size`, exact.
    dollar_volume: Decimal,
}

impl TradeRecord {
    /// Create a trade record.
    ///
    /// Fails only when `price * size` overflows the decimal range.
    pub fn new(
        timestamp: impl Into<String>,
        price: Decimal,
        size: Decimal,
        bid: Decimal,
        ask: Decimal,
    ) -> Result<Self> {
        let dollar_volume = price
            .checked_mul(size)
            .ok_or_else(|| Error::overflow(format!("{} * {}", price, size)))?;

        Ok(Self {
            timestamp: timestamp.into(),
            price,
            size,
            bid,
            ask,
            dollar_volume,
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn size(&self) -> Decimal {
        self.size
    }

    pub fn bid(&self) -> Decimal {
        self.bid
    }

    pub fn ask(&self) -> Decimal {
        self.ask
    }

    /// Dollar volume of the print (`price * size`).
    #[inline]
    pub fn dollar_volume(&self) -> Decimal {
        self.dollar_volume
    }

    /// Inferred direction of the print.
    #[inline]
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::classify(self.price, self.bid, self.ask)
    }

    /// Order two records by timestamp, failing if either has none.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        if self.timestamp.trim().is_empty() || other.timestamp.trim().is_empty() {
            return Err(Error::invalid_timestamp(
                "cannot order a trade record without a timestamp",
            ));
        }
        Ok(self.timestamp.cmp(&other.timestamp))
    }
}

impl PartialEq for TradeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl PartialOrd for TradeRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for TradeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.timestamp,
            self.sentiment(),
            self.price,
            self.bid,
            self.ask,
            self.dollar_volume
        )
    }
}

/// How a bucket treats its bounds. Applies to both `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// `min <= price <= max`.
    #[default]
    Inclusive,
    /// `min < price < max`.
    Exclusive,
}

impl BoundaryMode {
    /// Test a price against `[min, max]` under this mode.
    #[inline]
    pub fn contains(self, min: Decimal, max: Decimal, price: Decimal) -> bool {
        match self {
            BoundaryMode::Inclusive => price >= min && price <= max,
            BoundaryMode::Exclusive => price > min && price < max,
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryMode::Inclusive => f.write_str("INCLUSIVE"),
            BoundaryMode::Exclusive => f.write_str("EXCLUSIVE"),
        }
    }
}

impl FromStr for BoundaryMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(BoundaryMode::Inclusive),
            "exclusive" => Ok(BoundaryMode::Exclusive),
            other => Err(Error::config(format!("unrecognized boundary mode '{}'", other))),
        }
    }
}

/// Immutable bucket definition, loaded once per ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketDefinition {
    /// Caller-defined label (need not be numeric).
    pub name: String,
    /// Lower bound.
    pub min: Decimal,
    /// Upper bound.
    pub max: Decimal,
    /// Boundary semantics.
    #[serde(default)]
    pub boundary_mode: BoundaryMode,
}

impl BucketDefinition {
    pub fn new(name: impl Into<String>, min: Decimal, max: Decimal, boundary_mode: BoundaryMode) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            boundary_mode,
        }
    }
}

impl fmt::Display for BucketDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.name, self.min, self.max, self.boundary_mode)
    }
}

/// Share volume and dollar volume split by sentiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeTotals {
    /// Total shares.
    pub volume: Decimal,
    /// Shares printed at/above the ask.
    pub buy_volume: Decimal,
    /// Shares printed at/below the bid.
    pub sell_volume: Decimal,
    /// Unclassified shares.
    pub unknown_volume: Decimal,
    /// Total dollar volume.
    pub dollar_volume: Decimal,
    /// Buy dollar volume.
    pub buy_dollar_volume: Decimal,
    /// Sell dollar volume.
    pub sell_dollar_volume: Decimal,
    /// Unclassified dollar volume.
    pub unknown_dollar_volume: Decimal,
}

fn checked_sum(a: Decimal, b: Decimal, field: &str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::overflow(format!("{} total {} + {}", field, a, b)))
}

impl VolumeTotals {
    /// Add one trade.
    ///
    /// On overflow the totals are left untouched.
    pub fn add_trade(&mut self, trade: &TradeRecord) -> Result<()> {
        let size = trade.size();
        let dollars = trade.dollar_volume();

        let mut next = self.clone();
        next.volume = checked_sum(next.volume, size, "volume")?;
        next.dollar_volume = checked_sum(next.dollar_volume, dollars, "dollar volume")?;

        match trade.sentiment() {
            Sentiment::Buy => {
                next.buy_volume = checked_sum(next.buy_volume, size, "buy volume")?;
                next.buy_dollar_volume =
                    checked_sum(next.buy_dollar_volume, dollars, "buy dollar volume")?;
            }
            Sentiment::Sell => {
                next.sell_volume = checked_sum(next.sell_volume, size, "sell volume")?;
                next.sell_dollar_volume =
                    checked_sum(next.sell_dollar_volume, dollars, "sell dollar volume")?;
            }
            Sentiment::Unknown => {
                next.unknown_volume = checked_sum(next.unknown_volume, size, "unknown volume")?;
                next.unknown_dollar_volume =
                    checked_sum(next.unknown_dollar_volume, dollars, "unknown dollar volume")?;
            }
        }

        *self = next;
        Ok(())
    }

    /// Totals over a slice of trades.
    pub fn from_trades(trades: &[TradeRecord]) -> Result<Self> {
        let mut totals = Self::default();
        for trade in trades {
            totals.add_trade(trade)?;
        }
        Ok(totals)
    }

    /// Field-wise sum of two snapshots.
    pub fn checked_add(&self, other: &VolumeTotals) -> Result<Self> {
        Ok(Self {
            volume: checked_sum(self.volume, other.volume, "volume")?,
            buy_volume: checked_sum(self.buy_volume, other.buy_volume, "buy volume")?,
            sell_volume: checked_sum(self.sell_volume, other.sell_volume, "sell volume")?,
            unknown_volume: checked_sum(self.unknown_volume, other.unknown_volume, "unknown volume")?,
            dollar_volume: checked_sum(self.dollar_volume, other.dollar_volume, "dollar volume")?,
            buy_dollar_volume: checked_sum(
                self.buy_dollar_volume,
                other.buy_dollar_volume,
                "buy dollar volume",
            )?,
            sell_dollar_volume: checked_sum(
                self.sell_dollar_volume,
                other.sell_dollar_volume,
                "sell dollar volume",
            )?,
            unknown_dollar_volume: checked_sum(
                self.unknown_dollar_volume,
                other.unknown_dollar_volume,
                "unknown dollar volume",
            )?,
        })
    }

    /// Volume-weighted average price, zero when there is no volume.
    pub fn average_price(&self, scale: u32) -> Decimal {
        math::ratio(self.dollar_volume, self.volume, scale)
    }

    /// Volume-weighted average price, failing when there is no volume.
    pub fn try_average_price(&self, scale: u32) -> Result<Decimal> {
        math::checked_ratio(self.dollar_volume, self.volume, scale)
    }

    /// Sentiment shares of volume and dollar volume.
    pub fn ratios(&self) -> SentimentRatios {
        SentimentRatios {
            buy_volume: math::ratio(self.buy_volume, self.volume, PCT_SCALE),
            sell_volume: math::ratio(self.sell_volume, self.volume, PCT_SCALE),
            unknown_volume: math::ratio(self.unknown_volume, self.volume, PCT_SCALE),
            buy_dollar_volume: math::ratio(self.buy_dollar_volume, self.dollar_volume, PCT_SCALE),
            sell_dollar_volume: math::ratio(self.sell_dollar_volume, self.dollar_volume, PCT_SCALE),
            unknown_dollar_volume: math::ratio(
                self.unknown_dollar_volume,
                self.dollar_volume,
                PCT_SCALE,
            ),
        }
    }
}

/// Fractions (0-1, five places) of each sentiment in the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRatios {
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    pub unknown_volume: Decimal,
    pub buy_dollar_volume: Decimal,
    pub sell_dollar_volume: Decimal,
    pub unknown_dollar_volume: Decimal,
}

/// Snapshot of one price bucket's accumulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub name: String,
    pub trade_count: u64,
    pub volume: Decimal,
    pub dollar_volume: Decimal,
}

/// Aggregates of one trading day, ready for formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// 1-based position in the processed batch.
    pub ordinal: u32,
    /// Opaque date key.
    pub date: String,
    /// Number of parsed trades.
    pub trade_count: usize,
    /// VWAP at the configured scale.
    pub average_price: Decimal,
    /// Sentiment totals.
    pub totals: VolumeTotals,
    /// Sentiment ratios.
    pub ratios: SentimentRatios,
    /// Bucket accumulators in definition order.
    pub buckets: Vec<BucketSummary>,
}

impl DaySummary {
    /// True when no trades were parsed for the day.
    pub fn is_empty(&self) -> bool {
        self.trade_count == 0
    }
}

/// Aggregates over all folded days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// Number of non-empty days folded in.
    pub days: u32,
    /// VWAP over the whole period.
    pub average_price: Decimal,
    /// Sentiment totals.
    pub totals: VolumeTotals,
    /// Sentiment ratios.
    pub ratios: SentimentRatios,
}
