//! Billable rate conversion and interval pricing
//!
//! Rates are entered as currency per hour and converted to currency per
//! millisecond for accrual. All arithmetic is exact decimal:
//!
//! - **Conversion**: `rate / 3_600_000`, rounded half-up to [`RATE_SCALE`] digits
//! - **Interval cost**: `rate_per_ms × elapsed_ms × attendees`
//! - **Bad input**: anything unparseable is a zero rate, never an error
//!
//! # Examples
//!
//! ```
//! use meetcost_core::rate::{interval_cost, BillableRate};
//! use rust_decimal::Decimal;
//!
//! // $60/hr for one attendee over one minute
//! let rate = BillableRate::parse("60");
//! let cost = interval_cost(60_000, 1, rate);
//! assert_eq!(cost.round_dp(2), Decimal::new(100, 2));
//!
//! // Garbage input accrues nothing
//! let rate = BillableRate::parse("abc");
//! assert!(interval_cost(3_600_000, 10, rate).is_zero());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

/// Milliseconds in one hour
pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Fractional digits kept on the per-millisecond rate
pub const RATE_SCALE: u32 = 10;

/// Billable rate in currency units per millisecond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillableRate(Decimal);

impl BillableRate {
    pub const ZERO: BillableRate = BillableRate(Decimal::ZERO);

    /// Convert a per-hour rate into a per-millisecond rate
    pub fn from_hourly(per_hour: Decimal) -> Self {
        let per_ms = per_hour
            .checked_div(Decimal::from(MS_PER_HOUR))
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self(per_ms)
    }

    /// Parse raw user input (currency per hour)
    ///
    /// Accepts plain decimals (`"125.50"`) and scientific notation (`"1.2e2"`).
    /// Surrounding whitespace is ignored; digit separators (`"1_000"`) are not.
    /// Anything else yields [`BillableRate::ZERO`].
    pub fn parse(input: &str) -> Self {
        let rate = parse_hourly(input)
            .map(Self::from_hourly)
            .unwrap_or(Self::ZERO);
        debug!(input, per_ms = %rate.0, "billable rate");
        rate
    }

    /// Whether the raw input parses as a number at all
    pub fn is_valid_input(input: &str) -> bool {
        parse_hourly(input).is_some()
    }

    pub fn per_ms(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Cost of one hour for `attendees` at this rate
    pub fn hourly_burn(&self, attendees: u32) -> Decimal {
        interval_cost(MS_PER_HOUR as u64, attendees, *self)
    }
}

fn parse_hourly(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    // Decimal::from_str tolerates `_` separators; a typed rate must not
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Cost of one interval: `rate × elapsed_ms × attendees`
///
/// Saturates instead of overflowing so callers never see a panic.
pub fn interval_cost(elapsed_ms: u64, attendees: u32, rate: BillableRate) -> Decimal {
    let cost = rate
        .per_ms()
        .saturating_mul(Decimal::from(elapsed_ms))
        .saturating_mul(Decimal::from(attendees));
    debug!(elapsed_ms, attendees, %cost, "interval cost");
    cost
}
