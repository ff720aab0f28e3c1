//! Lease lifecycle rules.
//!
//! - [`LeaseStatus`] and its forward-only state machine.
//! - [`DateRange`] with the inclusive overlap rule used for double-booking
//!   prevention.
//! - [`derive_status`], which computes a lease's status from its dates and
//!   the current date.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Wire and storage format for lease dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment due day applied when the client omits it (or sends zero).
pub const DEFAULT_PAYMENT_DUE_DAY: i32 = 1;

/// Latest valid payment due day of a month.
pub const MAX_PAYMENT_DUE_DAY: i32 = 31;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle stage of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Upcoming,
    Active,
    Ended,
}

/// All valid status strings.
const VALID_STATUS_STRINGS: &[&str] = &["upcoming", "active", "ended"];

impl LeaseStatus {
    /// Statuses that hold a booking on the property. Leases in these
    /// statuses must not overlap and block property/tenant deletion.
    pub const BOOKED: [LeaseStatus; 2] = [LeaseStatus::Upcoming, LeaseStatus::Active];

    /// Return the status as a lowercase string slice (storage form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    /// Parse a status from its lowercase string form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            _ => Err(CoreError::Validation(format!(
                "Invalid lease status '{s}'. Must be one of: {}",
                VALID_STATUS_STRINGS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forward-only transitions driven by the passage of time.
///
/// `upcoming -> active -> ended`, plus `upcoming -> ended` for a lease whose
/// whole window already lies in the past. Nothing leaves `ended`.
pub mod state_machine {
    use super::LeaseStatus;

    /// Returns the statuses reachable from `from`.
    pub fn valid_transitions(from: LeaseStatus) -> &'static [LeaseStatus] {
        match from {
            LeaseStatus::Upcoming => &[LeaseStatus::Active, LeaseStatus::Ended],
            LeaseStatus::Active => &[LeaseStatus::Ended],
            LeaseStatus::Ended => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: LeaseStatus, to: LeaseStatus) -> bool {
        valid_transitions(from).contains(&to)
    }
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str, field: &str) -> Result<Date, CoreError> {
    Date::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "Invalid date format for {field}: '{value}' (use YYYY-MM-DD)"
        ))
    })
}

/// An inclusive lease window `[start, end]` with `end` strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Build a range, rejecting `end <= start`.
    pub fn new(start: Date, end: Date) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::Validation(format!(
                "End date ({end}) must be after start date ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from `YYYY-MM-DD` strings, then check ordering.
    ///
    /// Format errors are reported before ordering errors.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        let start = parse_date(start, "startDate")?;
        let end = parse_date(end, "endDate")?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Inclusive overlap: two ranges conflict unless one ends strictly
    /// before the other begins. Ranges sharing a boundary day overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Whether `day` falls inside the range (both ends inclusive).
    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Derive a lease's status from its window and the current date.
///
/// `upcoming` if it starts after today, `ended` if it finished before
/// today, otherwise `active`.
pub fn derive_status(range: &DateRange, today: Date) -> LeaseStatus {
    if range.contains(today) {
        LeaseStatus::Active
    } else if range.start > today {
        LeaseStatus::Upcoming
    } else {
        LeaseStatus::Ended
    }
}

/// The status a periodic refresh should move a lease to, if any.
///
/// Only forward transitions are produced; a lease whose derived status
/// would move it backwards (or not at all) is left alone.
pub fn refreshed_status(
    current: LeaseStatus,
    range: &DateRange,
    today: Date,
) -> Option<LeaseStatus> {
    let derived = derive_status(range, today);
    if derived != current && state_machine::can_transition(current, derived) {
        Some(derived)
    } else {
        None
    }
}

/// Resolve the payment due day: unset or zero means the default (1);
/// anything else must be a valid day of month.
pub fn resolve_payment_due_day(day: Option<i32>) -> Result<i32, CoreError> {
    match day {
        None | Some(0) => Ok(DEFAULT_PAYMENT_DUE_DAY),
        Some(d) if (1..=MAX_PAYMENT_DUE_DAY).contains(&d) => Ok(d),
        Some(d) => Err(CoreError::Validation(format!(
            "paymentDueDay must be between 1 and {MAX_PAYMENT_DUE_DAY}, got {d}"
        ))),
    }
}
