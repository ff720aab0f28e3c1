//! Request extractors.
//!
//! - [`auth::AdminSession`] -- Requires a valid admin bearer token.

pub mod auth;
