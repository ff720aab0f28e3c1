//! Domain rules for the rentals backend.
//!
//! This crate has no internal dependencies and no I/O, so the same rules
//! can be shared by the repository layer, the HTTP layer and tests.

pub mod clock;
pub mod error;
pub mod lease;
pub mod types;
pub mod validation;
