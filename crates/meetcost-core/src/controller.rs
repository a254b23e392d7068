//! Meter controller
//!
//! Translates user actions into ledger events. The controller owns the
//! ledger outright; all calls come from one thread of control, so nothing
//! here is shared or locked. The running flag is read from the ledger itself
//! rather than tracked separately.

use crate::display::DisplaySnapshot;
use crate::event::EventKind;
use crate::ledger::MeetingLedger;
use crate::rate::BillableRate;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct MeterController {
    ledger: MeetingLedger,
}

impl MeterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start when stopped, stop when running. Returns the kind appended.
    pub fn toggle(&mut self, now: i64, rate_input: &str) -> EventKind {
        let kind = if self.is_running() {
            EventKind::Stop
        } else {
            EventKind::Start
        };
        self.ledger
            .append_event(kind, now, BillableRate::parse(rate_input));
        info!(%kind, "Meeting timer toggled");
        kind
    }

    pub fn add_attendee(&mut self, now: i64, rate_input: &str) {
        self.ledger
            .add_attendee(now, BillableRate::parse(rate_input));
    }

    /// Remove one attendee. Suppressed (returns false) when nobody is present.
    pub fn remove_attendee(&mut self, now: i64, rate_input: &str) -> bool {
        if self.ledger.attendee_count() == 0 {
            debug!("Remove ignored, no attendees");
            return false;
        }
        self.ledger
            .remove_attendee(now, BillableRate::parse(rate_input));
        true
    }

    /// Stop the timer and discard the whole log
    pub fn reset(&mut self) {
        info!(events = self.ledger.len(), "Meeting reset");
        self.ledger.clear();
    }

    /// Periodic tick. `None` while stopped, otherwise a fresh snapshot.
    pub fn tick(&self, now: i64, rate_input: &str) -> Option<DisplaySnapshot> {
        self.is_running()
            .then(|| self.ledger.query_display(now, rate_input))
    }

    pub fn snapshot(&self, now: i64, rate_input: &str) -> DisplaySnapshot {
        self.ledger.query_display(now, rate_input)
    }

    pub fn is_running(&self) -> bool {
        self.ledger.is_running()
    }

    pub fn attendee_count(&self) -> u32 {
        self.ledger.attendee_count()
    }

    pub fn ledger(&self) -> &MeetingLedger {
        &self.ledger
    }
}
