//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - An entity struct with its `FromRow` mapping (SQL NULL -> `None`)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! JSON bodies use camelCase keys.

pub mod dashboard;
pub mod lease;
pub mod property;
pub mod tenant;
