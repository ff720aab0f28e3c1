//! Admin dashboard aggregate counts.

use serde::Serialize;
use sqlx::FromRow;

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: i64,
    pub available_properties: i64,
    pub total_tenants: i64,
    pub active_leases: i64,
    pub upcoming_leases: i64,
}
