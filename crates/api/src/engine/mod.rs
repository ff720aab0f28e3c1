//! Domain operations behind the HTTP handlers.
//!
//! Each operation validates its input, then runs its reads and writes in a
//! single transaction so that lease bookings, lease statuses and property
//! availability stay consistent with each other.
//!
//! - [`properties`] -- property CRUD with booking-aware delete and availability guard.
//! - [`tenants`] -- tenant CRUD with booking-aware delete.
//! - [`leases`] -- lease lifecycle: overlap prevention, status derivation,
//!   availability propagation.
//! - [`refresh`] -- the time-driven status pass.

pub mod leases;
pub mod properties;
pub mod refresh;
pub mod tenants;
