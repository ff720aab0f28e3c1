//! Lease lifecycle operations.
//!
//! Writes lock the property row before checking for overlaps, so two
//! concurrent bookings of one property serialize. The `ex_leases_no_overlap`
//! exclusion constraint catches anything that slips past.

use rentals_core::error::CoreError;
use rentals_core::lease::{derive_status, parse_date, resolve_payment_due_day, DateRange, LeaseStatus};
use rentals_core::types::{Date, DbId};
use rentals_core::validation::validate_non_negative;
use rentals_db::models::lease::{CreateLease, Lease, LeaseFields, LeaseFilter, UpdateLease};
use rentals_db::repositories::{LeaseRepo, PropertyRepo, TenantRepo};
use rentals_db::DbPool;
use sqlx::PgConnection;

use crate::error::AppResult;

const REQUIRED_FIELDS: &str = "Property, tenant, start date, and end date are required";
const OVERLAP: &str = "This property already has an active or upcoming lease during this period";

/// List leases with property and tenant names, newest start date first.
pub async fn list(pool: &DbPool, filter: &LeaseFilter) -> AppResult<Vec<Lease>> {
    Ok(LeaseRepo::list(pool, filter).await?)
}

/// Fetch one lease with property and tenant names.
pub async fn get(pool: &DbPool, id: DbId) -> AppResult<Lease> {
    LeaseRepo::find_with_names(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Lease", id).into())
}

/// Book a property for a tenant.
///
/// Validation short-circuits in this order: required fields, date format,
/// date order, property exists, tenant exists, no overlap, payment day and
/// amounts. Status is derived from the dates and `today`; a lease that is
/// active on creation takes its property off the market.
pub async fn create(pool: &DbPool, today: Date, input: &CreateLease) -> AppResult<Lease> {
    let (property_id, tenant_id, start, end) = required_fields(input)?;
    let range = DateRange::parse(start, end)?;

    let mut tx = pool.begin().await?;

    if !PropertyRepo::lock(&mut *tx, property_id).await? {
        return Err(CoreError::not_found("Property", property_id).into());
    }
    if TenantRepo::find_by_id(&mut *tx, tenant_id).await?.is_none() {
        return Err(CoreError::not_found("Tenant", tenant_id).into());
    }
    ensure_no_overlap(&mut tx, property_id, &range, None).await?;

    let status = derive_status(&range, today);
    let payment_due_day = resolve_payment_due_day(input.payment_due_day)?;
    validate_amounts(input.monthly_rent, input.deposit_amount)?;

    let fields = LeaseFields {
        property_id,
        tenant_id,
        range,
        monthly_rent: input.monthly_rent,
        deposit_amount: input.deposit_amount,
        status,
        payment_due_day,
        notes: input.notes.clone(),
    };
    let lease = LeaseRepo::create(&mut *tx, &fields).await?;

    if status == LeaseStatus::Active {
        PropertyRepo::sync_availability(&mut *tx, property_id).await?;
    }

    tx.commit().await?;

    tracing::info!(
        lease_id = lease.id,
        property_id,
        tenant_id,
        status = %status,
        "Lease created"
    );
    Ok(lease)
}

/// Apply a partial update to a lease.
///
/// Supplied fields are merged over the stored row and the result is
/// validated as a whole. Overlap is re-checked when the window or property
/// is supplied, or when the lease stays booked. Status is re-derived from the
/// merged dates, so an update can also correct an ended lease back to active. Availability is
/// re-synced on the old and new property when either side was active.
pub async fn update(pool: &DbPool, today: Date, id: DbId, input: &UpdateLease) -> AppResult<Lease> {
    let mut tx = pool.begin().await?;

    let existing = LeaseRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Lease", id))?;

    let start = match input.start_date.as_deref() {
        Some(raw) => parse_date(raw, "startDate")?,
        None => existing.start_date,
    };
    let end = match input.end_date.as_deref() {
        Some(raw) => parse_date(raw, "endDate")?,
        None => existing.end_date,
    };
    let range = DateRange::new(start, end)?;

    let property_id = input.property_id.unwrap_or(existing.property_id);
    let tenant_id = input.tenant_id.unwrap_or(existing.tenant_id);

    // Ascending id order keeps lock acquisition consistent across writers.
    let mut properties = vec![existing.property_id, property_id];
    properties.sort_unstable();
    properties.dedup();
    for &pid in &properties {
        if !PropertyRepo::lock(&mut *tx, pid).await? {
            return Err(CoreError::not_found("Property", pid).into());
        }
    }

    if tenant_id != existing.tenant_id && TenantRepo::find_by_id(&mut *tx, tenant_id).await?.is_none()
    {
        return Err(CoreError::not_found("Tenant", tenant_id).into());
    }

    // A notes-only edit of an ended lease must not trip over later bookings.
    let status = derive_status(&range, today);
    let window_changed =
        input.start_date.is_some() || input.end_date.is_some() || input.property_id.is_some();
    if window_changed || LeaseStatus::BOOKED.contains(&status) {
        ensure_no_overlap(&mut tx, property_id, &range, Some(id)).await?;
    }

    let payment_due_day = match input.payment_due_day {
        Some(day) => resolve_payment_due_day(Some(day))?,
        None => existing.payment_due_day,
    };
    let monthly_rent = input.monthly_rent.unwrap_or(existing.monthly_rent);
    let deposit_amount = input.deposit_amount.or(existing.deposit_amount);
    validate_amounts(monthly_rent, deposit_amount)?;

    let fields = LeaseFields {
        property_id,
        tenant_id,
        range,
        monthly_rent,
        deposit_amount,
        status,
        payment_due_day,
        notes: input.notes.clone().or(existing.notes),
    };
    let lease = LeaseRepo::update(&mut *tx, id, &fields)
        .await?
        .ok_or_else(|| CoreError::not_found("Lease", id))?;

    if existing.status == LeaseStatus::Active || status == LeaseStatus::Active {
        for &pid in &properties {
            PropertyRepo::sync_availability(&mut *tx, pid).await?;
        }
    }

    tx.commit().await?;

    if existing.status != status {
        tracing::info!(lease_id = id, from = %existing.status, to = %status, "Lease status changed by update");
    }
    Ok(lease)
}

/// Delete a lease. Removing an active lease puts its property back on the
/// market unless another active lease still holds it.
pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let removed = LeaseRepo::delete(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Lease", id))?;

    if removed.status == LeaseStatus::Active {
        PropertyRepo::sync_availability(&mut *tx, removed.property_id).await?;
    }

    tx.commit().await?;

    tracing::info!(lease_id = id, property_id = removed.property_id, status = %removed.status, "Lease deleted");
    Ok(())
}

/// Check presence of the fields a booking cannot do without.
///
/// Ids must be positive and dates non-blank.
fn required_fields(input: &CreateLease) -> Result<(DbId, DbId, &str, &str), CoreError> {
    let missing = || CoreError::Validation(REQUIRED_FIELDS.into());
    let property_id = input.property_id.filter(|id| *id > 0).ok_or_else(missing)?;
    let tenant_id = input.tenant_id.filter(|id| *id > 0).ok_or_else(missing)?;
    let start = non_blank(input.start_date.as_deref()).ok_or_else(missing)?;
    let end = non_blank(input.end_date.as_deref()).ok_or_else(missing)?;
    Ok((property_id, tenant_id, start, end))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn validate_amounts(monthly_rent: f64, deposit_amount: Option<f64>) -> Result<(), CoreError> {
    validate_non_negative(monthly_rent, "monthlyRent")?;
    if let Some(deposit) = deposit_amount {
        validate_non_negative(deposit, "depositAmount")?;
    }
    Ok(())
}

async fn ensure_no_overlap(
    conn: &mut PgConnection,
    property_id: DbId,
    range: &DateRange,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    let overlapping = LeaseRepo::count_overlapping(conn, property_id, range, exclude_id).await?;
    if overlapping > 0 {
        tracing::debug!(property_id, overlapping, "Rejected overlapping lease");
        return Err(CoreError::Conflict(OVERLAP.into()).into());
    }
    Ok(())
}
