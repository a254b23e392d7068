//! meetcost-core - Core library for meetcost
//!
//! Provides the meeting event ledger, decimal cost accrual, the meter
//! controller and user configuration. No terminal or network I/O.

pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod event;
pub mod ledger;
pub mod rate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ColorScheme, MeterConfig};
pub use controller::MeterController;
pub use display::{format_cost, format_elapsed, DisplaySnapshot};
pub use error::CoreError;
pub use event::{EventKind, LedgerEvent};
pub use ledger::MeetingLedger;
pub use rate::{interval_cost, BillableRate};
