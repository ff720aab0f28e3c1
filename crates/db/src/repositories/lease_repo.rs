//! Repository for the `leases` table.
//!
//! Pure data access. Lifecycle rules (status derivation, overlap policy,
//! availability propagation) live in the lease engine, which calls these
//! methods inside a single transaction.

use rentals_core::lease::{DateRange, LeaseStatus};
use rentals_core::types::{Date, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::models::lease::{Lease, LeaseFields, LeaseFilter, LeaseWindow};
use crate::scan::collect_rows;

/// Column list for plain (unjoined) lease queries.
const COLUMNS: &str = "id, property_id, tenant_id, start_date, end_date, monthly_rent, \
    deposit_amount, status, payment_due_day, notes, created_at, updated_at";

/// Joined select adding the property and tenant display names.
const JOINED_SELECT: &str = "SELECT l.id, l.property_id, l.tenant_id, l.start_date, l.end_date, \
    l.monthly_rent, l.deposit_amount, l.status, l.payment_due_day, l.notes, \
    l.created_at, l.updated_at, \
    p.name AS property_name, \
    t.first_name || ' ' || t.last_name AS tenant_name \
    FROM leases l \
    JOIN properties p ON p.id = l.property_id \
    JOIN tenants t ON t.id = l.tenant_id";

/// Columns needed by the status refresh and delete bookkeeping.
const WINDOW_COLUMNS: &str = "id, property_id, status, start_date, end_date";

/// Storage strings of the statuses that hold a booking.
fn booked_statuses() -> Vec<&'static str> {
    LeaseStatus::BOOKED.iter().map(LeaseStatus::as_str).collect()
}

/// Provides CRUD and lifecycle queries for leases.
pub struct LeaseRepo;

impl LeaseRepo {
    /// Insert a new lease, returning the created row (without display names).
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &LeaseFields,
    ) -> Result<Lease, sqlx::Error> {
        let query = format!(
            "INSERT INTO leases
                (property_id, tenant_id, start_date, end_date, monthly_rent,
                 deposit_amount, status, payment_due_day, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(input.property_id)
            .bind(input.tenant_id)
            .bind(input.range.start())
            .bind(input.range.end())
            .bind(input.monthly_rent)
            .bind(input.deposit_amount)
            .bind(input.status.as_str())
            .bind(input.payment_due_day)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    /// Find a lease by ID, locking the row for the current transaction.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leases WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a lease by ID, including property and tenant display names.
    pub async fn find_with_names<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE l.id = $1");
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List leases with optional filters, most recent start date first.
    pub async fn list(pool: &PgPool, filter: &LeaseFilter) -> Result<Vec<Lease>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("l.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.property_id.is_some() {
            conditions.push(format!("l.property_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.tenant_id.is_some() {
            conditions.push(format!("l.tenant_id = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("{JOINED_SELECT} {where_clause} ORDER BY l.start_date DESC, l.id DESC");

        let mut q = sqlx::query(&query);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(property_id) = filter.property_id {
            q = q.bind(property_id);
        }
        if let Some(tenant_id) = filter.tenant_id {
            q = q.bind(tenant_id);
        }

        let rows = q.fetch_all(pool).await?;
        Ok(collect_rows(rows, "lease"))
    }

    /// Count booked (upcoming/active) leases on `property_id` whose window
    /// overlaps `range` under the inclusive rule, optionally ignoring one
    /// lease (the one being updated).
    pub async fn count_overlapping<'e>(
        executor: impl PgExecutor<'e>,
        property_id: DbId,
        range: &DateRange,
        exclude_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM leases
             WHERE property_id = $1
               AND status = ANY($2)
               AND NOT (end_date < $3 OR start_date > $4)
               AND ($5::BIGINT IS NULL OR id <> $5)",
        )
        .bind(property_id)
        .bind(booked_statuses())
        .bind(range.start())
        .bind(range.end())
        .bind(exclude_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Count booked (upcoming/active) leases referencing a property.
    pub async fn count_booked_for_property<'e>(
        executor: impl PgExecutor<'e>,
        property_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM leases WHERE property_id = $1 AND status = ANY($2)",
        )
        .bind(property_id)
        .bind(booked_statuses())
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Count booked (upcoming/active) leases referencing a tenant.
    pub async fn count_booked_for_tenant<'e>(
        executor: impl PgExecutor<'e>,
        tenant_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM leases WHERE tenant_id = $1 AND status = ANY($2)")
                .bind(tenant_id)
                .bind(booked_statuses())
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    /// Count `active` leases on a property.
    pub async fn count_active_for_property<'e>(
        executor: impl PgExecutor<'e>,
        property_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM leases WHERE property_id = $1 AND status = 'active'",
        )
        .bind(property_id)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }

    /// Overwrite every stored field of a lease.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &LeaseFields,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!(
            "UPDATE leases SET
                property_id = $2,
                tenant_id = $3,
                start_date = $4,
                end_date = $5,
                monthly_rent = $6,
                deposit_amount = $7,
                status = $8,
                payment_due_day = $9,
                notes = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .bind(input.property_id)
            .bind(input.tenant_id)
            .bind(input.range.start())
            .bind(input.range.end())
            .bind(input.monthly_rent)
            .bind(input.deposit_amount)
            .bind(input.status.as_str())
            .bind(input.payment_due_day)
            .bind(&input.notes)
            .fetch_optional(executor)
            .await
    }

    /// Delete a lease, returning what was removed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<LeaseWindow>, sqlx::Error> {
        let query = format!("DELETE FROM leases WHERE id = $1 RETURNING {WINDOW_COLUMNS}");
        sqlx::query_as::<_, LeaseWindow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Booked leases whose window has started by `today`, locked for update.
    ///
    /// These are the only leases a status refresh can move: an `upcoming`
    /// lease that has started becomes `active` or `ended`, an `active` one
    /// that has finished becomes `ended`.
    pub async fn list_refresh_candidates<'e>(
        executor: impl PgExecutor<'e>,
        today: Date,
    ) -> Result<Vec<LeaseWindow>, sqlx::Error> {
        let query = format!(
            "SELECT {WINDOW_COLUMNS} FROM leases
             WHERE status = ANY($1) AND start_date <= $2
             ORDER BY id
             FOR UPDATE"
        );
        let rows = sqlx::query(&query)
            .bind(booked_statuses())
            .bind(today)
            .fetch_all(executor)
            .await?;
        Ok(collect_rows(rows, "lease"))
    }

    /// Set the status of every lease in `ids`. Returns the number of rows changed.
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[DbId],
        status: LeaseStatus,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE leases SET status = $1 WHERE id = ANY($2)")
            .bind(status.as_str())
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
