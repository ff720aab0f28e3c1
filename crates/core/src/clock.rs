//! Source of "today" for status derivation.
//!
//! Lease status depends on the wall-clock date, so the engine and the
//! refresh job read it through [`Clock`] instead of calling `Utc::now()`
//! directly. Tests pin the date with [`FixedClock`].

use chrono::Utc;

use crate::types::Date;

/// Provides the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// The real clock. Dates are taken in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Utc::now().date_naive()
    }
}

/// A clock frozen on a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
