//! Append-only meeting ledger
//!
//! The ledger folds a log of [`LedgerEvent`]s into elapsed time, attendee
//! count and accrued cost. Events are never mutated or removed once appended.
//!
//! The cost of an interval is only known once its end is known, so each
//! append prices the interval that it closes, using the rate supplied with
//! that append. Those closed costs are cached beside the log. The open tail
//! is priced at query time with whatever rate the caller passes, so changing
//! the rate mid-meeting reprices only the interval currently running.
//!
//! Any two adjacent events bound one interval, whatever their kinds. Every
//! interval from the first START onward is billable, including the spans
//! between a STOP and the next START and the tail after a STOP. Elapsed time
//! is stricter and only counts spans during which the clock runs.

use crate::display::DisplaySnapshot;
use crate::event::{EventKind, LedgerEvent};
use crate::rate::{interval_cost, BillableRate};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// In-memory event log for a single meeting
#[derive(Debug, Clone, Default)]
pub struct MeetingLedger {
    events: Vec<LedgerEvent>,
    /// `closed_costs[i]` is the cost of `events[i]` → `events[i + 1]`
    closed_costs: Vec<Decimal>,
    /// Set once a START is logged; intervals before it are never billed
    started: bool,
}

impl MeetingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event at `now`, pricing the interval it closes at `rate`
    ///
    /// A `now` earlier than the last event is clamped to that event's
    /// timestamp so the log stays chronological.
    pub fn append_event(&mut self, kind: EventKind, now: i64, rate: BillableRate) -> LedgerEvent {
        let mut timestamp_ms = now;
        let mut attendees_before = 0;
        let mut running_before = false;

        if let Some(last) = self.events.last().copied() {
            if now < last.timestamp_ms {
                warn!(
                    now,
                    last = last.timestamp_ms,
                    "Clock went backwards, clamping event timestamp"
                );
                timestamp_ms = last.timestamp_ms;
            }

            let cost = if self.started {
                interval_cost(span(last.timestamp_ms, timestamp_ms), last.attendees_after, rate)
            } else {
                Decimal::ZERO
            };
            self.closed_costs.push(cost);

            attendees_before = last.attendees_after;
            running_before = last.running_after;
        }

        let event = LedgerEvent {
            timestamp_ms,
            kind,
            attendees_after: kind.apply_to(attendees_before),
            running_after: kind.running_after(running_before),
        };

        if kind == EventKind::Remove && attendees_before == 0 {
            warn!("Attendee removed with none present, count stays at 0");
        }
        debug!(
            %kind,
            timestamp_ms,
            attendees = event.attendees_after,
            running = event.running_after,
            "Event appended"
        );

        self.started |= kind == EventKind::Start;
        self.events.push(event);
        event
    }

    pub fn start(&mut self, now: i64, rate: BillableRate) -> LedgerEvent {
        self.append_event(EventKind::Start, now, rate)
    }

    pub fn stop(&mut self, now: i64, rate: BillableRate) -> LedgerEvent {
        self.append_event(EventKind::Stop, now, rate)
    }

    pub fn add_attendee(&mut self, now: i64, rate: BillableRate) -> LedgerEvent {
        self.append_event(EventKind::Add, now, rate)
    }

    pub fn remove_attendee(&mut self, now: i64, rate: BillableRate) -> LedgerEvent {
        self.append_event(EventKind::Remove, now, rate)
    }

    /// Total running time in milliseconds, including the open interval
    pub fn elapsed_time(&self, now: i64) -> u64 {
        let closed = self
            .events
            .windows(2)
            .filter(|pair| pair[0].running_after)
            .fold(0u64, |acc, pair| {
                acc.saturating_add(span(pair[0].timestamp_ms, pair[1].timestamp_ms))
            });

        let elapsed = closed.saturating_add(self.open_span(now));
        debug!(elapsed, "elapsed time");
        elapsed
    }

    /// Attendee count after the last event, 0 for an empty log
    pub fn attendee_count(&self) -> u32 {
        self.events.last().map_or(0, |e| e.attendees_after)
    }

    /// Whether the clock is running after the last event
    pub fn is_running(&self) -> bool {
        self.events.last().is_some_and(|e| e.running_after)
    }

    /// Sum of closed interval costs plus the open tail priced at `current_rate`
    ///
    /// The tail accrues whether or not the clock is running, but only once
    /// the meeting has started.
    pub fn total_cost(&self, now: i64, current_rate: BillableRate) -> Decimal {
        let closed = self
            .closed_costs
            .iter()
            .fold(Decimal::ZERO, |acc, cost| acc.saturating_add(*cost));

        let live = match self.events.last() {
            Some(last) if self.started => interval_cost(
                span(last.timestamp_ms, now),
                last.attendees_after,
                current_rate,
            ),
            _ => Decimal::ZERO,
        };

        let total = closed.saturating_add(live);
        debug!(%total, "total cost");
        total
    }

    /// Read-only projection for rendering
    pub fn query_display(&self, now: i64, rate_input: &str) -> DisplaySnapshot {
        let rate = BillableRate::parse(rate_input);
        DisplaySnapshot {
            elapsed_ms: self.elapsed_time(now),
            attendee_count: self.attendee_count(),
            total_cost: self.total_cost(now, rate),
            running: self.is_running(),
        }
    }

    /// Cost accrued over the interval starting at event `index`
    ///
    /// `None` for the last event (its interval is still open) and for
    /// out-of-range indices.
    pub fn accrued_cost(&self, index: usize) -> Option<Decimal> {
        self.closed_costs.get(index).copied()
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard every event and return to the initial empty state
    pub fn clear(&mut self) {
        debug!(events = self.events.len(), "Ledger cleared");
        self.events.clear();
        self.closed_costs.clear();
        self.started = false;
    }

    /// Running time in the open interval, 0 when stopped or when `now` lags the log
    fn open_span(&self, now: i64) -> u64 {
        match self.events.last() {
            Some(last) if last.running_after => span(last.timestamp_ms, now),
            _ => 0,
        }
    }
}

/// Non-negative distance between two timestamps
fn span(from: i64, to: i64) -> u64 {
    u64::try_from(to.saturating_sub(from)).unwrap_or(0)
}
