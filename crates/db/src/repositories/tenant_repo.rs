//! Repository for the `tenants` table.

use rentals_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use crate::scan::collect_rows;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, phone, date_of_birth, \
    emergency_contact_name, emergency_contact_phone, notes, created_at, updated_at";

/// Provides CRUD operations for tenants.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant, returning the created row.
    ///
    /// A duplicate email fails with a `uq_tenants_email` violation.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTenant,
    ) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants
                (first_name, last_name, email, phone, date_of_birth,
                 emergency_contact_name, emergency_contact_phone, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(input.email.trim())
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.emergency_contact_name)
            .bind(&input.emergency_contact_phone)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    /// Find a tenant by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock a tenant row for the rest of the current transaction.
    ///
    /// Returns `false` if no such tenant exists.
    pub async fn lock<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(row.is_some())
    }

    /// List all tenants ordered by last name, then first name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants ORDER BY last_name, first_name, id");
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        Ok(collect_rows(rows, "tenant"))
    }

    /// Update a tenant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateTenant,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!(
            "UPDATE tenants SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                date_of_birth = COALESCE($6, date_of_birth),
                emergency_contact_name = COALESCE($7, emergency_contact_name),
                emergency_contact_phone = COALESCE($8, emergency_contact_phone),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .bind(input.first_name.as_deref().map(str::trim))
            .bind(input.last_name.as_deref().map(str::trim))
            .bind(input.email.as_deref().map(str::trim))
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.emergency_contact_name)
            .bind(&input.emergency_contact_phone)
            .bind(&input.notes)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a tenant by ID. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
