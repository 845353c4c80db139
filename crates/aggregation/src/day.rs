//! One trading day.
//!
//! Consumes the data lines of a single export, keeps every parsed trade in
//! file order and feeds each one to the day's private price buckets. Volume
//! aggregates are recomputed from the trade list on every call.

use crate::bucket::PriceBucket;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tape_core::math::{self, PCT_SCALE};
use tape_core::{BucketDefinition, DaySummary, Result, TradeRecord, VolumeTotals};
use tape_ingestion::{is_terminator, parse_trade_line};

/// Line counts from processing one day's input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Lines consumed before the sentinel or end of input.
    pub lines_read: usize,
    /// Lines parsed into trades.
    pub trades_accepted: usize,
    /// Lines that failed to parse.
    pub lines_rejected: usize,
    /// Whether the end-of-data row was reached.
    pub terminated_by_sentinel: bool,
}

/// Trades and bucket accumulators for one trading day.
#[derive(Debug, Clone)]
pub struct TradeDay {
    date: String,
    day_ordinal: u32,
    math_scale: u32,
    trades: Vec<TradeRecord>,
    buckets: Vec<PriceBucket>,
    /// Running sums, kept only to range-check each new trade.
    checked: VolumeTotals,
}

impl TradeDay {
    /// Create an empty day with fresh buckets built from `definitions`.
    pub fn new(date: impl Into<String>, definitions: &[BucketDefinition], math_scale: u32) -> Self {
        Self {
            date: date.into(),
            day_ordinal: 0,
            math_scale,
            trades: Vec::new(),
            buckets: PriceBucket::from_definitions(definitions),
            checked: VolumeTotals::default(),
        }
    }

    /// Parse data lines until the sentinel row or end of input.
    ///
    /// A line that fails to parse, or whose trade would overflow the day's
    /// totals, is logged and skipped.
    pub fn process<I, S>(&mut self, lines: I) -> ProcessStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = ProcessStats::default();

        for line in lines {
            let line = line.as_ref();
            if is_terminator(line) {
                tracing::trace!(date = %self.date, "Reached end of trade data");
                stats.terminated_by_sentinel = true;
                break;
            }
            stats.lines_read += 1;

            match parse_trade_line(line).and_then(|trade| self.add_trade(trade)) {
                Ok(()) => stats.trades_accepted += 1,
                Err(e) => {
                    stats.lines_rejected += 1;
                    tracing::warn!(
                        date = %self.date,
                        line = stats.lines_read,
                        data = line,
                        "Skipping trade line: {}",
                        e
                    );
                }
            }
        }

        tracing::debug!(
            date = %self.date,
            read = stats.lines_read,
            accepted = stats.trades_accepted,
            rejected = stats.lines_rejected,
            "Processed day input"
        );
        stats
    }

    /// Record a trade and offer it to every bucket.
    ///
    /// Overlapping buckets all count the trade. Fails with `Overflow`, leaving
    /// the day unchanged, when the trade would overflow the day totals or any
    /// bucket accepting it.
    pub fn add_trade(&mut self, trade: TradeRecord) -> Result<()> {
        let mut checked = self.checked.clone();
        checked.add_trade(&trade)?;
        for bucket in &self.buckets {
            bucket.check_trade(&trade)?;
        }

        tracing::trace!(date = %self.date, "Trade {}", trade);
        self.checked = checked;
        for bucket in &mut self.buckets {
            if bucket.accepts_trade(&trade) {
                tracing::trace!(bucket = bucket.name(), price = %trade.price(), "Bucketed trade");
            }
        }
        self.trades.push(trade);
        Ok(())
    }

    /// True when no trades were parsed.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn day_ordinal(&self) -> u32 {
        self.day_ordinal
    }

    /// Assign the display position of this day in the processed batch.
    pub fn set_day_ordinal(&mut self, ordinal: u32) {
        self.day_ordinal = ordinal;
    }

    pub fn math_scale(&self) -> u32 {
        self.math_scale
    }

    /// Parsed trades in file order.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Buckets in definition order.
    pub fn buckets(&self) -> &[PriceBucket] {
        &self.buckets
    }

    /// Sentiment totals, recomputed over all trades.
    pub fn totals(&self) -> VolumeTotals {
        // add_trade range-checked every prefix of this sum
        VolumeTotals::from_trades(&self.trades).unwrap_or_else(|_| self.checked.clone())
    }

    pub fn volume(&self) -> Decimal {
        self.totals().volume
    }

    pub fn buy_volume(&self) -> Decimal {
        self.totals().buy_volume
    }

    pub fn sell_volume(&self) -> Decimal {
        self.totals().sell_volume
    }

    pub fn unknown_volume(&self) -> Decimal {
        self.totals().unknown_volume
    }

    pub fn dollar_volume(&self) -> Decimal {
        self.totals().dollar_volume
    }

    pub fn buy_dollar_volume(&self) -> Decimal {
        self.totals().buy_dollar_volume
    }

    pub fn sell_dollar_volume(&self) -> Decimal {
        self.totals().sell_dollar_volume
    }

    pub fn unknown_dollar_volume(&self) -> Decimal {
        self.totals().unknown_dollar_volume
    }

    /// VWAP at the day's scale; zero for a day without volume.
    pub fn average_price(&self) -> Decimal {
        self.totals().average_price(self.math_scale)
    }

    /// VWAP at the day's scale; `DivisionByZero` for a day without volume.
    pub fn try_average_price(&self) -> Result<Decimal> {
        self.totals().try_average_price(self.math_scale)
    }

    pub fn pct_buy_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.buy_volume, totals.volume, PCT_SCALE)
    }

    pub fn pct_sell_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.sell_volume, totals.volume, PCT_SCALE)
    }

    pub fn pct_unknown_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.unknown_volume, totals.volume, PCT_SCALE)
    }

    pub fn pct_buy_dol_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.buy_dollar_volume, totals.dollar_volume, PCT_SCALE)
    }

    pub fn pct_sell_dol_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.sell_dollar_volume, totals.dollar_volume, PCT_SCALE)
    }

    pub fn pct_unknown_dol_vol(&self) -> Decimal {
        let totals = self.totals();
        math::ratio(totals.unknown_dollar_volume, totals.dollar_volume, PCT_SCALE)
    }

    /// Snapshot for the formatters.
    pub fn summary(&self) -> DaySummary {
        let totals = self.totals();
        DaySummary {
            ordinal: self.day_ordinal,
            date: self.date.clone(),
            trade_count: self.trades.len(),
            average_price: totals.average_price(self.math_scale),
            ratios: totals.ratios(),
            totals,
            buckets: self.buckets.iter().map(PriceBucket::summary).collect(),
        }
    }
}
