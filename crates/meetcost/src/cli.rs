//! CLI commands that run without the terminal UI
//!
//! `estimate` replays a synthetic meeting through the same ledger the TUI
//! uses and prints the result.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use meetcost_core::{
    format_cost, BillableRate, Clock, DisplaySnapshot, ManualClock, MeterController,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// Start of the replayed meeting. Only differences between timestamps matter.
const REPLAY_START_MS: i64 = 0;

/// Result of replaying a meeting of fixed size and length
#[derive(Debug, Serialize)]
pub struct Estimate {
    pub attendees: u32,
    pub minutes: u64,
    pub rate: String,
    pub hourly_burn: Decimal,
    pub events: usize,
    #[serde(flatten)]
    pub snapshot: DisplaySnapshot,
}

/// Replay `attendees` joins, a start, and a stop `minutes` later
pub fn run_estimate(attendees: u32, minutes: u64, rate_input: &str) -> Result<Estimate> {
    let duration_ms = minutes
        .checked_mul(60_000)
        .and_then(|ms| i64::try_from(ms).ok())
        .context("Meeting length is too long to replay")?;

    if !BillableRate::is_valid_input(rate_input) {
        warn!(rate = %rate_input, "Rate is not a number, estimating with zero rate");
    }

    let clock = ManualClock::new(REPLAY_START_MS);
    let mut meter = MeterController::new();

    for _ in 0..attendees {
        meter.add_attendee(clock.now_millis(), rate_input);
    }
    meter.toggle(clock.now_millis(), rate_input);
    clock.advance(duration_ms);
    meter.toggle(clock.now_millis(), rate_input);

    let snapshot = meter.snapshot(clock.now_millis(), rate_input);
    debug!(?snapshot, "Estimate replayed");

    Ok(Estimate {
        attendees,
        minutes,
        rate: rate_input.trim().to_string(),
        hourly_burn: BillableRate::parse(rate_input).hourly_burn(attendees),
        events: meter.ledger().len(),
        snapshot,
    })
}

/// Format an estimate (human table or JSON)
pub fn format_estimate(
    estimate: &Estimate,
    currency_symbol: &str,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return serde_json::to_string_pretty(estimate).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(vec!["Metric", "Value"]);
    } else {
        table.set_header(vec![
            Cell::new("Metric").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    }

    let total = format_cost(estimate.snapshot.total_cost, currency_symbol);
    let rows = [
        ("Attendees", estimate.attendees.to_string()),
        ("Duration", estimate.snapshot.elapsed_label()),
        ("Rate", format!("{}/hr", rate_label(&estimate.rate, currency_symbol))),
        (
            "Burn",
            format!("{}/hr", format_cost(estimate.hourly_burn, currency_symbol)),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }

    if no_color {
        table.add_row(vec!["Total cost".to_string(), total]);
    } else {
        table.add_row(vec![
            Cell::new("Total cost"),
            Cell::new(total).fg(Color::Magenta),
        ]);
    }

    table.to_string()
}

fn rate_label(rate: &str, currency_symbol: &str) -> String {
    if BillableRate::is_valid_input(rate) {
        format_cost(BillableRate::parse(rate).hourly_burn(1), currency_symbol)
    } else {
        format!("{} (invalid)", if rate.is_empty() { "-" } else { rate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_one_minute_at_sixty() {
        let estimate = run_estimate(1, 1, "60").unwrap();

        assert_eq!(estimate.snapshot.elapsed_ms, 60_000);
        assert_eq!(estimate.snapshot.cost_cents(), Decimal::new(100, 2));
        assert!(!estimate.snapshot.running);
        // 1 ADD + START + STOP
        assert_eq!(estimate.events, 3);
    }

    #[test]
    fn test_estimate_team_meeting() {
        let estimate = run_estimate(5, 30, "120").unwrap();

        assert_eq!(estimate.snapshot.attendee_count, 5);
        assert_eq!(estimate.snapshot.cost_cents(), Decimal::new(30_000, 2));
        // Per-ms rate is rounded, so the burn is a hair under 600
        assert_eq!(estimate.hourly_burn.round_dp(2), Decimal::from(600));
    }

    #[test]
    fn test_estimate_invalid_rate_costs_nothing() {
        let estimate = run_estimate(3, 10, "abc").unwrap();

        assert_eq!(estimate.snapshot.elapsed_ms, 600_000);
        assert!(estimate.snapshot.total_cost.is_zero());
    }

    #[test]
    fn test_estimate_no_attendees() {
        let estimate = run_estimate(0, 15, "200").unwrap();
        assert!(estimate.snapshot.total_cost.is_zero());
        assert_eq!(estimate.events, 2);
    }

    #[test]
    fn test_estimate_rejects_overflowing_length() {
        assert!(run_estimate(1, u64::MAX, "60").is_err());
    }

    #[test]
    fn test_format_estimate_table() {
        let estimate = run_estimate(2, 90, "100").unwrap();
        let output = format_estimate(&estimate, "$", false, true);

        assert!(output.contains("Attendees"));
        assert!(output.contains("01:30:00"));
        assert!(output.contains("$100.00/hr"));
        assert!(output.contains("$200.00/hr"));
        assert!(output.contains("$300.00"));
    }

    #[test]
    fn test_format_estimate_json() {
        let estimate = run_estimate(1, 1, "60").unwrap();
        let output = format_estimate(&estimate, "$", true, false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["attendees"], 1);
        assert_eq!(value["elapsed_ms"], 60_000);
        assert_eq!(value["running"], false);
        assert!(value.get("total_cost").is_some());
    }

    #[test]
    fn test_rate_label_invalid() {
        assert_eq!(rate_label("abc", "$"), "abc (invalid)");
        assert_eq!(rate_label("", "$"), "- (invalid)");
        assert_eq!(rate_label("75", "€"), "€75.00");
    }
}
