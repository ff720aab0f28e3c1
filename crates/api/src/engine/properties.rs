//! Property operations.

use rentals_core::error::CoreError;
use rentals_core::types::DbId;
use rentals_core::validation::{require_non_empty, validate_non_negative, validate_non_negative_count};
use rentals_db::models::property::{CreateProperty, Property, PropertyFilter, UpdateProperty};
use rentals_db::repositories::{LeaseRepo, PropertyRepo};
use rentals_db::DbPool;

use crate::error::AppResult;

/// Public search: available first, then cheapest.
pub async fn search(pool: &DbPool, filter: &PropertyFilter) -> AppResult<Vec<Property>> {
    Ok(PropertyRepo::search(pool, filter).await?)
}

/// Admin listing: newest first.
pub async fn list(pool: &DbPool) -> AppResult<Vec<Property>> {
    Ok(PropertyRepo::list(pool).await?)
}

pub async fn get(pool: &DbPool, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Property", id).into())
}

pub async fn create(pool: &DbPool, input: &CreateProperty) -> AppResult<Property> {
    validate_create(input)?;
    let property = PropertyRepo::create(pool, input).await?;
    tracing::info!(property_id = property.id, "Property created");
    Ok(property)
}

/// Partial update. Marking a property available while an active lease
/// holds it is a conflict.
pub async fn update(pool: &DbPool, id: DbId, input: &UpdateProperty) -> AppResult<Property> {
    validate_update(input)?;

    let mut tx = pool.begin().await?;
    if !PropertyRepo::lock(&mut *tx, id).await? {
        return Err(CoreError::not_found("Property", id).into());
    }
    if input.available == Some(true)
        && LeaseRepo::count_active_for_property(&mut *tx, id).await? > 0
    {
        return Err(CoreError::Conflict(
            "Property has an active lease and cannot be marked available".into(),
        )
        .into());
    }
    let property = PropertyRepo::update(&mut *tx, id, input)
        .await?
        .ok_or_else(|| CoreError::not_found("Property", id))?;
    tx.commit().await?;

    Ok(property)
}

/// Delete a property that holds no upcoming or active lease. Ended leases
/// go with it.
pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    if !PropertyRepo::lock(&mut *tx, id).await? {
        return Err(CoreError::not_found("Property", id).into());
    }
    let booked = LeaseRepo::count_booked_for_property(&mut *tx, id).await?;
    if booked > 0 {
        return Err(CoreError::Conflict(format!(
            "Cannot delete property with {booked} active or upcoming lease(s)"
        ))
        .into());
    }
    PropertyRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(property_id = id, "Property deleted");
    Ok(())
}

fn validate_create(input: &CreateProperty) -> Result<(), CoreError> {
    require_non_empty(Some(input.name.as_str()), "name")?;
    require_non_empty(Some(input.address_line1.as_str()), "addressLine1")?;
    require_non_empty(Some(input.city.as_str()), "city")?;
    require_non_empty(Some(input.state.as_str()), "state")?;
    require_non_empty(Some(input.zip.as_str()), "zip")?;
    if let Some(ref property_type) = input.property_type {
        require_non_empty(Some(property_type.as_str()), "propertyType")?;
    }
    validate_numbers(
        Some(input.bedrooms),
        Some(input.bathrooms),
        input.square_feet,
        Some(input.monthly_rent),
        input.deposit_amount,
    )
}

fn validate_update(input: &UpdateProperty) -> Result<(), CoreError> {
    let text_fields = [
        (&input.name, "name"),
        (&input.address_line1, "addressLine1"),
        (&input.city, "city"),
        (&input.state, "state"),
        (&input.zip, "zip"),
        (&input.property_type, "propertyType"),
    ];
    for (value, name) in text_fields {
        if value.is_some() {
            require_non_empty(value.as_deref(), name)?;
        }
    }
    validate_numbers(
        input.bedrooms,
        input.bathrooms,
        input.square_feet,
        input.monthly_rent,
        input.deposit_amount,
    )
}

fn validate_numbers(
    bedrooms: Option<i32>,
    bathrooms: Option<f64>,
    square_feet: Option<i32>,
    monthly_rent: Option<f64>,
    deposit_amount: Option<f64>,
) -> Result<(), CoreError> {
    if let Some(v) = bedrooms {
        validate_non_negative_count(v, "bedrooms")?;
    }
    if let Some(v) = square_feet {
        validate_non_negative_count(v, "squareFeet")?;
    }
    if let Some(v) = bathrooms {
        validate_non_negative(v, "bathrooms")?;
    }
    if let Some(v) = monthly_rent {
        validate_non_negative(v, "monthlyRent")?;
    }
    if let Some(v) = deposit_amount {
        validate_non_negative(v, "depositAmount")?;
    }
    Ok(())
}
