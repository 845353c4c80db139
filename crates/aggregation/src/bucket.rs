//! Price buckets.
//!
//! Each trading day gets its own set of buckets built from the ticker's
//! definitions. A bucket tallies count, share volume and dollar volume of the
//! trades whose price falls inside it.

use rust_decimal::Decimal;
use std::fmt;
use tape_core::{BoundaryMode, BucketDefinition, BucketSummary, Error, Result, TradeRecord};

/// Accumulating price interval.
#[derive(Debug, Clone)]
pub struct PriceBucket {
    name: String,
    min: Decimal,
    max: Decimal,
    boundary_mode: BoundaryMode,
    trade_count: u64,
    volume: Decimal,
    dollar_volume: Decimal,
}

impl PriceBucket {
    /// Create an empty bucket.
    pub fn new(name: impl Into<String>, min: Decimal, max: Decimal, boundary_mode: BoundaryMode) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            boundary_mode,
            trade_count: 0,
            volume: Decimal::ZERO,
            dollar_volume: Decimal::ZERO,
        }
    }

    /// Create an empty bucket from a definition.
    pub fn from_definition(def: &BucketDefinition) -> Self {
        Self::new(def.name.clone(), def.min, def.max, def.boundary_mode)
    }

    /// Fresh buckets for one trading day, in definition order.
    pub fn from_definitions(defs: &[BucketDefinition]) -> Vec<Self> {
        defs.iter().map(Self::from_definition).collect()
    }

    /// Whether a price lies inside this bucket.
    #[inline]
    pub fn contains(&self, price: Decimal) -> bool {
        self.boundary_mode.contains(self.min, self.max, price)
    }

    /// New `(volume, dollar_volume)` if the trade falls in this bucket.
    fn accumulate(&self, trade: &TradeRecord) -> Result<Option<(Decimal, Decimal)>> {
        if !self.contains(trade.price()) {
            return Ok(None);
        }

        let overflow = || Error::overflow(format!("bucket {} at {}", self.name, trade));
        let volume = self.volume.checked_add(trade.size()).ok_or_else(overflow)?;
        let dollar_volume = self
            .dollar_volume
            .checked_add(trade.dollar_volume())
            .ok_or_else(overflow)?;
        Ok(Some((volume, dollar_volume)))
    }

    /// Whether the trade falls in this bucket, without changing it.
    ///
    /// Fails when accepting it would overflow the accumulators.
    pub fn check_trade(&self, trade: &TradeRecord) -> Result<bool> {
        Ok(self.accumulate(trade)?.is_some())
    }

    /// Offer a trade to the bucket. Accumulators only change on acceptance.
    ///
    /// A trade that would overflow the accumulators is refused.
    pub fn accepts_trade(&mut self, trade: &TradeRecord) -> bool {
        match self.accumulate(trade) {
            Ok(Some((volume, dollar_volume))) => {
                self.trade_count += 1;
                self.volume = volume;
                self.dollar_volume = dollar_volume;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(bucket = %self.name, "Refusing trade: {}", e);
                false
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundary_mode
    }

    /// Number of accepted trades.
    pub fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Shares of accepted trades.
    pub fn volume(&self) -> Decimal {
        self.volume
    }

    /// Dollar volume of accepted trades.
    pub fn dollar_volume(&self) -> Decimal {
        self.dollar_volume
    }

    /// Snapshot of the accumulators.
    pub fn summary(&self) -> BucketSummary {
        BucketSummary {
            name: self.name.clone(),
            trade_count: self.trade_count,
            volume: self.volume,
            dollar_volume: self.dollar_volume,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.name, self.min, self.max, self.boundary_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_trade(price: &str, size: &str) -> TradeRecord {
        TradeRecord::new("09:30:01", dec(price), dec(size), dec("0.0004"), dec("0.0005")).unwrap()
    }

    #[test]
    fn test_degenerate_inclusive_accepts_exact_price() {
        let trade = make_trade("0.0004", "1000");
        let mut bucket = PriceBucket::new("0004", dec("0.0004"), dec("0.0004"), BoundaryMode::Inclusive);

        assert!(bucket.accepts_trade(&trade));
        assert_eq!(bucket.trade_count(), 1);
        assert_eq!(bucket.volume(), dec("1000"));
        assert_eq!(bucket.dollar_volume(), dec("0.4"));
    }

    #[test]
    fn test_degenerate_exclusive_rejects_exact_price() {
        let trade = make_trade("0.0004", "1000");
        let mut bucket = PriceBucket::new("0004", dec("0.0004"), dec("0.0004"), BoundaryMode::Exclusive);

        assert!(!bucket.accepts_trade(&trade));
        assert_eq!(bucket.trade_count(), 0);
        assert_eq!(bucket.volume(), Decimal::ZERO);
        assert_eq!(bucket.dollar_volume(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_other_price() {
        let trade = make_trade("0.0005", "1000");
        let mut bucket = PriceBucket::new("0004", dec("0.0004"), dec("0.0004"), BoundaryMode::Inclusive);
        assert!(!bucket.accepts_trade(&trade));
    }

    #[test]
    fn test_inclusive_bounds() {
        let trade = make_trade("0.0004", "1000");

        let mut upper = PriceBucket::new("0004", dec("0.0004"), dec("0.0005"), BoundaryMode::Inclusive);
        assert!(upper.accepts_trade(&trade));

        let mut lower = PriceBucket::new("0003", dec("0.0003"), dec("0.0004"), BoundaryMode::Inclusive);
        assert!(lower.accepts_trade(&trade));
    }

    #[test]
    fn test_exclusive_bounds() {
        let mut bucket = PriceBucket::new("mid", dec("0.0003"), dec("0.0005"), BoundaryMode::Exclusive);

        assert!(!bucket.accepts_trade(&make_trade("0.0003", "1")));
        assert!(!bucket.accepts_trade(&make_trade("0.0005", "1")));
        assert!(bucket.accepts_trade(&make_trade("0.0004", "1")));
        assert_eq!(bucket.trade_count(), 1);
    }

    #[test]
    fn test_accumulators_monotonic() {
        let mut bucket = PriceBucket::new("low", dec("0.0001"), dec("0.0004"), BoundaryMode::Inclusive);
        let trades = [
            make_trade("0.0004", "1000"),
            make_trade("0.0006", "5000"), // outside
            make_trade("0.0002", "250"),
            make_trade("0.0003", "100"),
        ];

        let mut expected = Decimal::ZERO;
        let mut accepted = 0;
        for trade in &trades {
            let before = bucket.dollar_volume();
            if bucket.accepts_trade(trade) {
                accepted += 1;
                expected += trade.price() * trade.size();
            }
            assert!(bucket.dollar_volume() >= before);
        }

        assert_eq!(bucket.trade_count(), accepted);
        assert_eq!(accepted, 3);
        assert_eq!(bucket.dollar_volume(), expected);
        assert_eq!(bucket.volume(), dec("1350"));
    }

    #[test]
    fn test_overflow_is_refused_without_change() {
        let big = make_trade("1", "50000000000000000000000000000");
        let mut bucket = PriceBucket::new("one", dec("1"), dec("1"), BoundaryMode::Inclusive);

        assert!(bucket.accepts_trade(&big));
        assert!(matches!(bucket.check_trade(&big), Err(Error::Overflow(_))));
        assert!(!bucket.accepts_trade(&big));
        assert_eq!(bucket.trade_count(), 1);
        assert_eq!(bucket.volume(), dec("50000000000000000000000000000"));
    }

    #[test]
    fn test_check_trade_does_not_accumulate() {
        let trade = make_trade("0.0004", "1000");
        let bucket = PriceBucket::new("0004", dec("0.0004"), dec("0.0004"), BoundaryMode::Inclusive);

        assert!(bucket.check_trade(&trade).unwrap());
        assert!(!bucket.check_trade(&make_trade("0.0006", "1")).unwrap());
        assert_eq!(bucket.trade_count(), 0);
    }

    #[test]
    fn test_from_definitions_keeps_order() {
        let defs = vec![
            BucketDefinition::new("b", dec("1"), dec("2"), BoundaryMode::Inclusive),
            BucketDefinition::new("a", dec("0"), dec("1"), BoundaryMode::Exclusive),
        ];
        let buckets = PriceBucket::from_definitions(&defs);
        assert_eq!(buckets[0].name(), "b");
        assert_eq!(buckets[1].boundary_mode(), BoundaryMode::Exclusive);
        assert_eq!(buckets[0].to_string(), "b, 1, 2, INCLUSIVE");
    }
}
