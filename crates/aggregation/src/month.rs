//! Running totals across trading days.

use crate::day::TradeDay;
use rust_decimal::Decimal;
use tape_core::math::{self, PCT_SCALE};
use tape_core::{MonthSummary, Result, VolumeTotals};

/// Folds non-empty days into period totals.
///
/// Totals are plain sums, so the order days are added in does not matter.
#[derive(Debug, Clone)]
pub struct MonthAccumulator {
    totals: VolumeTotals,
    days: u32,
    math_scale: u32,
}

impl MonthAccumulator {
    /// Create an empty accumulator rounding averages to `math_scale` places.
    pub fn new(math_scale: u32) -> Self {
        Self {
            totals: VolumeTotals::default(),
            days: 0,
            math_scale,
        }
    }

    /// Fold a day's totals. Empty days are ignored and return `Ok(false)`.
    ///
    /// Fails with `Overflow`, leaving the month unchanged, when the running
    /// totals cannot hold the day.
    pub fn add_day(&mut self, day: &TradeDay) -> Result<bool> {
        if day.is_empty() {
            tracing::debug!(date = day.date(), "Empty day not added to month");
            return Ok(false);
        }
        self.add_totals(&day.totals())?;
        Ok(true)
    }

    /// Fold a raw totals snapshot as one day.
    pub fn add_totals(&mut self, totals: &VolumeTotals) -> Result<()> {
        self.totals = self.totals.checked_add(totals)?;
        self.days += 1;
        Ok(())
    }

    /// Number of days folded in.
    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn totals(&self) -> &VolumeTotals {
        &self.totals
    }

    pub fn volume(&self) -> Decimal {
        self.totals.volume
    }

    pub fn buy_volume(&self) -> Decimal {
        self.totals.buy_volume
    }

    pub fn sell_volume(&self) -> Decimal {
        self.totals.sell_volume
    }

    pub fn unknown_volume(&self) -> Decimal {
        self.totals.unknown_volume
    }

    pub fn dollar_volume(&self) -> Decimal {
        self.totals.dollar_volume
    }

    pub fn buy_dollar_volume(&self) -> Decimal {
        self.totals.buy_dollar_volume
    }

    pub fn sell_dollar_volume(&self) -> Decimal {
        self.totals.sell_dollar_volume
    }

    pub fn unknown_dollar_volume(&self) -> Decimal {
        self.totals.unknown_dollar_volume
    }

    /// Period VWAP; zero when nothing was traded.
    pub fn average_price(&self) -> Decimal {
        self.totals.average_price(self.math_scale)
    }

    /// Period VWAP; `DivisionByZero` when nothing was traded.
    pub fn try_average_price(&self) -> Result<Decimal> {
        self.totals.try_average_price(self.math_scale)
    }

    pub fn pct_buy_vol(&self) -> Decimal {
        math::ratio(self.totals.buy_volume, self.totals.volume, PCT_SCALE)
    }

    pub fn pct_sell_vol(&self) -> Decimal {
        math::ratio(self.totals.sell_volume, self.totals.volume, PCT_SCALE)
    }

    pub fn pct_unknown_vol(&self) -> Decimal {
        math::ratio(self.totals.unknown_volume, self.totals.volume, PCT_SCALE)
    }

    pub fn pct_buy_dol_vol(&self) -> Decimal {
        math::ratio(self.totals.buy_dollar_volume, self.totals.dollar_volume, PCT_SCALE)
    }

    pub fn pct_sell_dol_vol(&self) -> Decimal {
        math::ratio(self.totals.sell_dollar_volume, self.totals.dollar_volume, PCT_SCALE)
    }

    pub fn pct_unknown_dol_vol(&self) -> Decimal {
        math::ratio(self.totals.unknown_dollar_volume, self.totals.dollar_volume, PCT_SCALE)
    }

    /// Snapshot for the formatters.
    pub fn summary(&self) -> MonthSummary {
        MonthSummary {
            days: self.days,
            average_price: self.average_price(),
            totals: self.totals.clone(),
            ratios: self.totals.ratios(),
        }
    }
}
