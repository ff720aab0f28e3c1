//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods accept any [`sqlx::PgExecutor`] so the same query can run on the
//! pool or inside a caller-owned transaction (`&mut *tx`).

pub mod dashboard_repo;
pub mod lease_repo;
pub mod property_repo;
pub mod tenant_repo;

pub use dashboard_repo::DashboardRepo;
pub use lease_repo::LeaseRepo;
pub use property_repo::PropertyRepo;
pub use tenant_repo::TenantRepo;
