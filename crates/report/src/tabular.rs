//! Human-readable summary blocks.

use crate::numfmt::{percent, percent_short, shares, usd, usd_precise};
use tape_core::{DaySummary, MonthSummary};

/// Line drawn above each block.
pub const RECORD_SEPARATOR: &str =
    "------------------------------------------------------------";

/// Block body for a day without trades.
pub const NO_TRADES: &str = "No trades recorded.";

const LABEL_WIDTH: usize = 26;

fn line(out: &mut Vec<String>, label: &str, value: String) {
    out.push(format!("{:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH));
}

/// Day block: averages, volumes, dollar volumes and sentiment percentages.
pub fn format_day_tabular(day: &DaySummary) -> String {
    if day.is_empty() {
        return NO_TRADES.to_string();
    }

    let t = &day.totals;
    let r = &day.ratios;
    let mut out = vec![
        RECORD_SEPARATOR.to_string(),
        format!("Trade summary for {}", day.date),
    ];

    line(&mut out, "Average price", usd_precise(day.average_price));
    line(&mut out, "Volume", shares(t.volume));
    line(&mut out, "Buy volume", shares(t.buy_volume));
    line(&mut out, "Sell volume", shares(t.sell_volume));
    line(&mut out, "Unknown volume", shares(t.unknown_volume));
    line(&mut out, "Dollar volume", usd(t.dollar_volume));
    line(&mut out, "Buy dollar volume", usd(t.buy_dollar_volume));
    line(&mut out, "Sell dollar volume", usd(t.sell_dollar_volume));
    line(&mut out, "Unknown dollar volume", usd(t.unknown_dollar_volume));
    line(&mut out, "Buy volume %", percent(r.buy_volume));
    line(&mut out, "Sell volume %", percent(r.sell_volume));
    line(&mut out, "Unknown volume %", percent(r.unknown_volume));
    line(&mut out, "Buy dollar volume %", percent(r.buy_dollar_volume));
    line(&mut out, "Sell dollar volume %", percent(r.sell_dollar_volume));
    line(&mut out, "Unknown dollar volume %", percent(r.unknown_dollar_volume));

    out.join("\n")
}

/// Closing block with the period totals.
pub fn format_month_tabular(month: &MonthSummary) -> String {
    let t = &month.totals;
    let r = &month.ratios;
    let mut out = vec![
        RECORD_SEPARATOR.to_string(),
        RECORD_SEPARATOR.to_string(),
        "Overall summary".to_string(),
    ];

    line(&mut out, "Trading days", month.days.to_string());
    line(&mut out, "VWAP", usd_precise(month.average_price));
    line(&mut out, "Volume", shares(t.volume));
    line(&mut out, "Buy volume", shares(t.buy_volume));
    line(&mut out, "Sell volume", shares(t.sell_volume));
    line(&mut out, "Unknown volume", shares(t.unknown_volume));
    line(&mut out, "Dollar volume", usd(t.dollar_volume));
    line(&mut out, "Buy dollar volume", usd(t.buy_dollar_volume));
    line(&mut out, "Sell dollar volume", usd(t.sell_dollar_volume));
    line(&mut out, "Unknown dollar volume", usd(t.unknown_dollar_volume));
    line(&mut out, "Buy dollar volume %", percent_short(r.buy_dollar_volume));
    line(&mut out, "Sell dollar volume %", percent_short(r.sell_dollar_volume));
    line(&mut out, "Unknown dollar volume %", percent_short(r.unknown_dollar_volume));

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tape_core::VolumeTotals;

    fn empty_day() -> DaySummary {
        let totals = VolumeTotals::default();
        DaySummary {
            ordinal: 1,
            date: "20190115".to_string(),
            trade_count: 0,
            average_price: Decimal::ZERO,
            ratios: totals.ratios(),
            totals,
            buckets: Vec::new(),
        }
    }

    #[test]
    fn test_empty_day_block() {
        assert_eq!(format_day_tabular(&empty_day()), NO_TRADES);
    }

    #[test]
    fn test_label_alignment() {
        let mut out = Vec::new();
        line(&mut out, "Volume", "6,000".to_string());
        assert_eq!(out[0], format!("Volume:{}6,000", " ".repeat(LABEL_WIDTH - 7)));
    }

    #[test]
    fn test_empty_month_block() {
        let totals = VolumeTotals::default();
        let month = MonthSummary {
            days: 0,
            average_price: Decimal::ZERO,
            ratios: totals.ratios(),
            totals,
        };

        let block = format_month_tabular(&month);
        assert!(block.starts_with(RECORD_SEPARATOR));
        assert!(block.contains("Overall summary"));
        assert!(block.contains("Trading days:"));
        assert!(block.contains("$0.000"));
        assert!(block.contains("0.0%"));
    }
}
