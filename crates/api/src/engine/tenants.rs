//! Tenant operations. Duplicate emails surface as a `uq_tenants_email`
//! violation, which the error layer renders as a conflict.

use rentals_core::error::CoreError;
use rentals_core::types::DbId;
use rentals_core::validation::{require_non_empty, validate_email};
use rentals_db::models::tenant::{CreateTenant, Tenant, UpdateTenant};
use rentals_db::repositories::{LeaseRepo, TenantRepo};
use rentals_db::DbPool;

use crate::error::AppResult;

pub async fn list(pool: &DbPool) -> AppResult<Vec<Tenant>> {
    Ok(TenantRepo::list(pool).await?)
}

pub async fn get(pool: &DbPool, id: DbId) -> AppResult<Tenant> {
    TenantRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tenant", id).into())
}

pub async fn create(pool: &DbPool, input: &CreateTenant) -> AppResult<Tenant> {
    validate_create(input)?;
    let tenant = TenantRepo::create(pool, input).await?;
    tracing::info!(tenant_id = tenant.id, "Tenant created");
    Ok(tenant)
}

pub async fn update(pool: &DbPool, id: DbId, input: &UpdateTenant) -> AppResult<Tenant> {
    validate_update(input)?;
    TenantRepo::update(pool, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Tenant", id).into())
}

/// Delete a tenant that holds no upcoming or active lease. Ended leases go
/// with it.
pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    if !TenantRepo::lock(&mut *tx, id).await? {
        return Err(CoreError::not_found("Tenant", id).into());
    }
    let booked = LeaseRepo::count_booked_for_tenant(&mut *tx, id).await?;
    if booked > 0 {
        return Err(CoreError::Conflict(format!(
            "Cannot delete tenant with {booked} active or upcoming lease(s)"
        ))
        .into());
    }
    TenantRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(tenant_id = id, "Tenant deleted");
    Ok(())
}

fn validate_create(input: &CreateTenant) -> Result<(), CoreError> {
    require_non_empty(Some(input.first_name.as_str()), "firstName")?;
    require_non_empty(Some(input.last_name.as_str()), "lastName")?;
    require_non_empty(Some(input.email.as_str()), "email")?;
    validate_email(&input.email)
}

fn validate_update(input: &UpdateTenant) -> Result<(), CoreError> {
    if input.first_name.is_some() {
        require_non_empty(input.first_name.as_deref(), "firstName")?;
    }
    if input.last_name.is_some() {
        require_non_empty(input.last_name.as_deref(), "lastName")?;
    }
    if let Some(ref email) = input.email {
        validate_email(email)?;
    }
    Ok(())
}
