//! Repository for the `properties` table.

use rentals_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::property::{
    encode_amenities, AvailabilitySync, CreateProperty, Property, PropertyFilter,
    UpdateProperty, DEFAULT_PROPERTY_TYPE,
};
use crate::scan::collect_rows;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address_line1, address_line2, city, state, zip, \
    property_type, bedrooms, bathrooms, square_feet, monthly_rent, deposit_amount, \
    available, available_date, description, amenities, image_url, created_at, updated_at";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property, returning the created row.
    ///
    /// `property_type` defaults to `house` and `available` to `true`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProperty,
    ) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (name, address_line1, address_line2, city, state, zip,
                 property_type, bedrooms, bathrooms, square_feet, monthly_rent,
                 deposit_amount, available, available_date, description, amenities, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, '{DEFAULT_PROPERTY_TYPE}'), $8, $9, $10,
                     $11, $12, COALESCE($13, TRUE), $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(input.name.trim())
            .bind(input.address_line1.trim())
            .bind(&input.address_line2)
            .bind(input.city.trim())
            .bind(input.state.trim())
            .bind(input.zip.trim())
            .bind(&input.property_type)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_feet)
            .bind(input.monthly_rent)
            .bind(input.deposit_amount)
            .bind(input.available)
            .bind(input.available_date)
            .bind(&input.description)
            .bind(encode_amenities(&input.amenities))
            .bind(&input.image_url)
            .fetch_one(executor)
            .await
    }

    /// Find a property by its ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock a property row for the rest of the current transaction.
    ///
    /// Returns `false` if no such property exists. Lease writes take this
    /// lock first so concurrent bookings of one property serialize.
    pub async fn lock<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM properties WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.is_some())
    }

    /// List all properties, newest first (admin view).
    pub async fn list(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        Ok(collect_rows(rows, "property"))
    }

    /// Search properties with optional filters (public view).
    ///
    /// Ordered available-first, then by ascending rent. Unpaginated.
    pub async fn search(
        pool: &PgPool,
        filter: &PropertyFilter,
    ) -> Result<Vec<Property>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.available.is_some() {
            conditions.push(format!("available = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.min_bedrooms.is_some() {
            conditions.push(format!("bedrooms >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.min_rent.is_some() {
            conditions.push(format!("monthly_rent >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.max_rent.is_some() {
            conditions.push(format!("monthly_rent <= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR address_line1 ILIKE ${bind_idx} OR city ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if filter.property_type.is_some() {
            conditions.push(format!("property_type = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM properties {where_clause}
             ORDER BY available DESC, monthly_rent ASC, id ASC"
        );

        let mut q = sqlx::query(&query);

        // Bind dynamic parameters in order.
        if let Some(available) = filter.available {
            q = q.bind(available);
        }
        if let Some(beds) = filter.min_bedrooms {
            q = q.bind(beds);
        }
        if let Some(min_rent) = filter.min_rent {
            q = q.bind(min_rent);
        }
        if let Some(max_rent) = filter.max_rent {
            q = q.bind(max_rent);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        if let Some(ref property_type) = filter.property_type {
            q = q.bind(property_type);
        }

        let rows = q.fetch_all(pool).await?;
        Ok(collect_rows(rows, "property"))
    }

    /// Update a property. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                name = COALESCE($2, name),
                address_line1 = COALESCE($3, address_line1),
                address_line2 = COALESCE($4, address_line2),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                zip = COALESCE($7, zip),
                property_type = COALESCE($8, property_type),
                bedrooms = COALESCE($9, bedrooms),
                bathrooms = COALESCE($10, bathrooms),
                square_feet = COALESCE($11, square_feet),
                monthly_rent = COALESCE($12, monthly_rent),
                deposit_amount = COALESCE($13, deposit_amount),
                available = COALESCE($14, available),
                available_date = COALESCE($15, available_date),
                description = COALESCE($16, description),
                amenities = COALESCE($17, amenities),
                image_url = COALESCE($18, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address_line1)
            .bind(&input.address_line2)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip)
            .bind(&input.property_type)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_feet)
            .bind(input.monthly_rent)
            .bind(input.deposit_amount)
            .bind(input.available)
            .bind(input.available_date)
            .bind(&input.description)
            .bind(input.amenities.as_deref().map(encode_amenities))
            .bind(&input.image_url)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a property by ID. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute `available` from the property's leases: a property is
    /// available exactly when no `active` lease references it.
    ///
    /// Returns the new flag and whether it changed, or `None` if the
    /// property does not exist.
    pub async fn sync_availability<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<AvailabilitySync>, sqlx::Error> {
        let row: Option<(bool, bool)> = sqlx::query_as(
            "UPDATE properties AS p SET available = NOT EXISTS (
                SELECT 1 FROM leases WHERE property_id = $1 AND status = 'active'
             )
             FROM (SELECT id, available FROM properties WHERE id = $1) AS prev
             WHERE p.id = prev.id
             RETURNING p.available, p.available IS DISTINCT FROM prev.available AS changed",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row.map(|(available, changed)| AvailabilitySync { available, changed }))
    }
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
