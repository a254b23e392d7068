//! Display-ready projection of the ledger

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Everything the meter shows, computed for a single instant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplaySnapshot {
    pub elapsed_ms: u64,
    pub attendee_count: u32,
    /// Exact accrued cost, not rounded
    pub total_cost: Decimal,
    pub running: bool,
}

impl DisplaySnapshot {
    /// Total cost rounded half-up to cents
    pub fn cost_cents(&self) -> Decimal {
        round_cents(self.total_cost)
    }

    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_ms)
    }

    pub fn cost_label(&self, currency_symbol: &str) -> String {
        format_cost(self.total_cost, currency_symbol)
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format milliseconds as `HH:MM:SS`
///
/// Hours wrap at 24, matching a wall-clock style timer.
pub fn format_elapsed(ms: u64) -> String {
    let seconds = (ms / 1_000) % 60;
    let minutes = (ms / 60_000) % 60;
    let hours = (ms / 3_600_000) % 24;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format an amount as currency: `$1,234.56`, `-$3.00`
pub fn format_cost(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        sign,
        currency_symbol,
        group_thousands(whole),
        fraction
    )
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(5_999), "00:00:05");
        assert_eq!(format_elapsed(3_723_000), "01:02:03");
    }

    #[test]
    fn test_format_elapsed_wraps_at_24_hours() {
        assert_eq!(format_elapsed(25 * 3_600_000), "01:00:00");
    }

    #[test]
    fn test_format_cost_rounds_half_up() {
        assert_eq!(format_cost(dec("1.000002"), "$"), "$1.00");
        assert_eq!(format_cost(dec("0.005"), "$"), "$0.01");
        assert_eq!(format_cost(dec("0.004999"), "$"), "$0.00");
    }

    #[test]
    fn test_format_cost_groups_thousands() {
        assert_eq!(format_cost(dec("1234.5"), "$"), "$1,234.50");
        assert_eq!(format_cost(dec("1234567.891"), "€"), "€1,234,567.89");
        assert_eq!(format_cost(dec("999"), "£"), "£999.00");
    }

    #[test]
    fn test_format_cost_negative_and_zero() {
        assert_eq!(format_cost(dec("-3"), "$"), "-$3.00");
        assert_eq!(format_cost(dec("-0.001"), "$"), "$0.00");
        assert_eq!(format_cost(Decimal::ZERO, ""), "0.00");
    }

    #[test]
    fn test_snapshot_labels() {
        let snapshot = DisplaySnapshot {
            elapsed_ms: 60_000,
            attendee_count: 1,
            total_cost: dec("1.000002"),
            running: true,
        };

        assert_eq!(snapshot.elapsed_label(), "00:01:00");
        assert_eq!(snapshot.cost_label("$"), "$1.00");
        assert_eq!(snapshot.cost_cents(), dec("1.00"));
    }

    #[test]
    fn test_snapshot_serializes_cost_as_string() {
        let snapshot = DisplaySnapshot {
            elapsed_ms: 1_000,
            attendee_count: 2,
            total_cost: dec("0.2"),
            running: false,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total_cost"], "0.2");
        assert_eq!(json["attendee_count"], 2);
    }
}
