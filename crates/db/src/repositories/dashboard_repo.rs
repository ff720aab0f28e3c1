//! Aggregate counts for the admin dashboard.

use sqlx::PgExecutor;

use crate::models::dashboard::DashboardStats;

/// Read-only dashboard queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Count properties, tenants and booked leases in a single round trip.
    pub async fn stats<'e>(executor: impl PgExecutor<'e>) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT
                (SELECT COUNT(*) FROM properties) AS total_properties,
                (SELECT COUNT(*) FROM properties WHERE available) AS available_properties,
                (SELECT COUNT(*) FROM tenants) AS total_tenants,
                (SELECT COUNT(*) FROM leases WHERE status = 'active') AS active_leases,
                (SELECT COUNT(*) FROM leases WHERE status = 'upcoming') AS upcoming_leases",
        )
        .fetch_one(executor)
        .await
    }
}
