//! Ledger events
//!
//! A meeting is recorded as a sequence of timestamped events. Each event
//! captures the attendee count and clock state in effect from its timestamp
//! until the next event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of user action recorded in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Clock starts (or resumes)
    Start,
    /// Clock pauses
    Stop,
    /// One attendee joins
    Add,
    /// One attendee leaves
    Remove,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Start,
            EventKind::Stop,
            EventKind::Add,
            EventKind::Remove,
        ]
    }

    /// Fixed change applied to the attendee count
    pub fn attendee_delta(&self) -> i32 {
        match self {
            EventKind::Start | EventKind::Stop => 0,
            EventKind::Add => 1,
            EventKind::Remove => -1,
        }
    }

    /// Attendee count after this event, saturating at zero
    pub fn apply_to(&self, attendees: u32) -> u32 {
        attendees.saturating_add_signed(self.attendee_delta())
    }

    /// Clock state after this event given the state before it
    pub fn running_after(&self, running_before: bool) -> bool {
        match self {
            EventKind::Start => true,
            EventKind::Stop => false,
            EventKind::Add | EventKind::Remove => running_before,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Stop => "stop",
            EventKind::Add => "add",
            EventKind::Remove => "remove",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEvent {
    /// Milliseconds since the Unix epoch, non-decreasing across the log
    pub timestamp_ms: i64,
    pub kind: EventKind,
    /// Attendee count in effect starting at this event
    pub attendees_after: u32,
    /// Whether the clock runs from this event until the next one
    pub running_after: bool,
}
