//! Integration tests for ledger accrual across whole meetings

use meetcost_core::{BillableRate, DisplaySnapshot, EventKind, MeetingLedger, MeterController};
use rust_decimal::Decimal;
use std::str::FromStr;

const T0: i64 = 1_700_000_000_000;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Build a ledger from `(offset_ms, kind)` pairs at a fixed rate
fn replay(steps: &[(i64, EventKind)], rate_input: &str) -> MeetingLedger {
    let rate = BillableRate::parse(rate_input);
    let mut ledger = MeetingLedger::new();
    for (offset, kind) in steps {
        ledger.append_event(*kind, T0 + offset, rate);
    }
    ledger
}

/// A handful of structurally different logs, including misuse
fn sample_logs() -> Vec<Vec<(i64, EventKind)>> {
    use EventKind::*;
    vec![
        vec![],
        vec![(0, Start)],
        vec![(0, Stop), (10, Stop)],
        vec![(0, Remove), (5, Remove), (9, Start)],
        vec![(0, Add), (0, Start), (1_000, Add), (4_000, Stop)],
        vec![(0, Start), (100, Start), (200, Add), (300, Remove), (400, Remove)],
        vec![
            (0, Add),
            (0, Add),
            (0, Start),
            (60_000, Stop),
            (120_000, Start),
            (180_000, Remove),
            (240_000, Stop),
        ],
    ]
}

#[test]
fn test_derivations_are_non_negative_for_all_logs() {
    for steps in sample_logs() {
        let ledger = replay(&steps, "90");
        for probe in [T0 - 1_000, T0, T0 + 500_000] {
            let snapshot = ledger.query_display(probe, "90");
            assert!(snapshot.total_cost >= Decimal::ZERO, "log {steps:?}");
            assert!(
                snapshot.elapsed_ms <= 500_000,
                "elapsed {} out of range for {steps:?}",
                snapshot.elapsed_ms
            );
        }
    }
}

#[test]
fn test_sixty_per_hour_one_attendee_one_minute() {
    use EventKind::*;
    let ledger = replay(&[(0, Add), (0, Start), (60_000, Stop)], "60");
    let snapshot = ledger.query_display(T0 + 60_000, "60");

    assert_eq!(snapshot.elapsed_ms, 60_000);
    assert_eq!(snapshot.cost_cents(), dec("1.00"));
    assert_eq!(snapshot.cost_label("$"), "$1.00");
}

#[test]
fn test_multiple_cycles_bill_gaps_but_not_elapsed() {
    use EventKind::*;
    // Two attendees, $360/hr = 0.0001/ms per attendee
    let ledger = replay(
        &[
            (0, Add),
            (0, Add),
            (0, Start),
            (10_000, Stop),
            (50_000, Start),
            (65_000, Stop),
        ],
        "360",
    );

    let at_stop = ledger.query_display(T0 + 65_000, "360");
    assert_eq!(at_stop.elapsed_ms, 25_000);
    // Every span from the first START: 65_000 ms × 2 × 0.0001
    assert_eq!(at_stop.total_cost, dec("13"));

    let later = ledger.query_display(T0 + 100_000, "360");
    assert_eq!(later.elapsed_ms, 25_000);
    assert_eq!(later.total_cost, dec("20"));
}

#[test]
fn test_adjacent_events_bound_one_interval_regardless_of_kind() {
    use EventKind::*;
    let ledger = replay(
        &[
            (0, Add),
            (0, Start),
            (60_000, Stop),
            (120_000, Add),
            (180_000, Start),
            (240_000, Remove),
        ],
        "60",
    );

    let per_minute = |attendees: i64| dec("0.0000166667") * Decimal::from(60_000 * attendees);
    // ADD → START sits before the first START
    assert_eq!(ledger.accrued_cost(0), Some(Decimal::ZERO));
    // START → STOP, STOP → ADD, ADD → START, START → REMOVE
    assert_eq!(ledger.accrued_cost(1), Some(per_minute(1)));
    assert_eq!(ledger.accrued_cost(2), Some(per_minute(1)));
    assert_eq!(ledger.accrued_cost(3), Some(per_minute(2)));
    assert_eq!(ledger.accrued_cost(4), Some(per_minute(2)));
    assert_eq!(ledger.accrued_cost(5), None);

    let snapshot = ledger.query_display(T0 + 240_000, "60");
    assert_eq!(snapshot.elapsed_ms, 120_000);
    assert_eq!(snapshot.cost_cents(), dec("6.00"));
}

#[test]
fn test_query_display_is_idempotent() {
    use EventKind::*;
    let ledger = replay(&[(0, Add), (0, Start), (1_500, Add)], "120");
    let before: Vec<_> = ledger.events().to_vec();

    let first = ledger.query_display(T0 + 9_000, "120");
    let second = ledger.query_display(T0 + 9_000, "120");

    assert_eq!(first, second);
    assert_eq!(ledger.events(), before.as_slice());
    assert_eq!(ledger.accrued_cost(2), None);
}

#[test]
fn test_invalid_rate_never_grows_cost() {
    use EventKind::*;
    let ledger = replay(&[(0, Add), (0, Start), (30_000, Add)], "abc");

    for probe in [T0, T0 + 60_000, T0 + 3_600_000] {
        assert!(ledger.query_display(probe, "abc").total_cost.is_zero());
    }
}

#[test]
fn test_rate_change_reprices_paused_tail_only() {
    use EventKind::*;
    let ledger = replay(&[(0, Add), (0, Start), (10_000, Stop)], "360");

    // Closed START → STOP keeps its append-time price of 1
    assert_eq!(ledger.query_display(T0 + 20_000, "0").total_cost, dec("1"));
    // The tail after STOP is open and priced at the query rate
    assert_eq!(ledger.query_display(T0 + 20_000, "360").total_cost, dec("2"));
    assert_eq!(ledger.query_display(T0 + 20_000, "720").total_cost, dec("3"));
}

#[test]
fn test_controller_session_end_to_end() {
    let mut meter = MeterController::new();
    let rate = "360";

    assert!(!meter.remove_attendee(T0, rate));
    meter.add_attendee(T0, rate);
    meter.add_attendee(T0, rate);
    meter.add_attendee(T0, rate);
    meter.toggle(T0, rate);
    assert!(meter.remove_attendee(T0 + 10_000, rate));
    meter.toggle(T0 + 20_000, rate);

    let snapshot = meter.snapshot(T0 + 30_000, rate);
    assert_eq!(snapshot.elapsed_ms, 20_000);
    assert_eq!(snapshot.attendee_count, 2);
    // 10s × 3 + 10s × 2 running, then 10s × 2 after the stop, at 0.0001/ms
    assert_eq!(snapshot.total_cost, dec("7"));
    assert!(!snapshot.running);

    meter.reset();
    assert_eq!(meter.snapshot(T0 + 30_000, rate), DisplaySnapshot::default());
}
