//! Lease entity model, DTOs and list filters.

use rentals_core::lease::{DateRange, LeaseStatus};
use rentals_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::scan::optional_column;

/// A lease row from the `leases` table.
///
/// `property_name` and `tenant_name` are display-only and populated only
/// by the joined read queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: DbId,
    pub property_id: DbId,
    pub tenant_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub monthly_rent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    pub status: LeaseStatus,
    pub payment_due_day: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
}

impl<'r> FromRow<'r, PgRow> for Lease {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            property_id: row.try_get("property_id")?,
            tenant_id: row.try_get("tenant_id")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            monthly_rent: row.try_get("monthly_rent")?,
            deposit_amount: row.try_get("deposit_amount")?,
            status: decode_status(row)?,
            payment_due_day: row.try_get("payment_due_day")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            property_name: optional_column(row, "property_name")?,
            tenant_name: optional_column(row, "tenant_name")?,
        })
    }
}

/// Decode the `status` TEXT column into a [`LeaseStatus`].
fn decode_status(row: &PgRow) -> Result<LeaseStatus, sqlx::Error> {
    let raw: String = row.try_get("status")?;
    LeaseStatus::parse(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

/// The minimal slice of a lease the status refresh works on.
#[derive(Debug, Clone)]
pub struct LeaseWindow {
    pub id: DbId,
    pub property_id: DbId,
    pub status: LeaseStatus,
    pub start_date: Date,
    pub end_date: Date,
}

impl<'r> FromRow<'r, PgRow> for LeaseWindow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            property_id: row.try_get("property_id")?,
            status: decode_status(row)?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        })
    }
}

/// DTO for creating a lease.
///
/// Ids and dates are optional and dates are raw strings so the engine can
/// report missing fields and bad date formats as validation errors. Any
/// `status` sent by the client is ignored: status is always derived.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLease {
    pub property_id: Option<DbId>,
    pub tenant_id: Option<DbId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub monthly_rent: f64,
    pub deposit_amount: Option<f64>,
    /// Defaults to 1 when omitted or zero.
    pub payment_due_day: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for updating a lease. All fields are optional; absent fields keep
/// their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLease {
    pub property_id: Option<DbId>,
    pub tenant_id: Option<DbId>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub monthly_rent: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub payment_due_day: Option<i32>,
    pub notes: Option<String>,
}

/// Fully validated lease values, written as a whole by insert and update.
#[derive(Debug, Clone)]
pub struct LeaseFields {
    pub property_id: DbId,
    pub tenant_id: DbId,
    pub range: DateRange,
    pub monthly_rent: f64,
    pub deposit_amount: Option<f64>,
    pub status: LeaseStatus,
    pub payment_due_day: i32,
    pub notes: Option<String>,
}

/// Filters for the admin lease listing. All filters AND-combine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaseFilter {
    pub status: Option<LeaseStatus>,
    pub property_id: Option<DbId>,
    pub tenant_id: Option<DbId>,
}
