//! Property entity model, DTOs and list filters.

use rentals_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// Property type applied when a create payload omits it.
pub const DEFAULT_PROPERTY_TYPE: &str = "house";

/// A property row from the `properties` table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: DbId,
    pub name: String,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub property_type: String,
    pub bedrooms: i32,
    pub bathrooms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<i32>,
    pub monthly_rent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered amenity tags. Stored as a JSON array in a TEXT column.
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl<'r> FromRow<'r, PgRow> for Property {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let amenities: Option<String> = row.try_get("amenities")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address_line1: row.try_get("address_line1")?,
            address_line2: row.try_get("address_line2")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            zip: row.try_get("zip")?,
            property_type: row.try_get("property_type")?,
            bedrooms: row.try_get("bedrooms")?,
            bathrooms: row.try_get("bathrooms")?,
            square_feet: row.try_get("square_feet")?,
            monthly_rent: row.try_get("monthly_rent")?,
            deposit_amount: row.try_get("deposit_amount")?,
            available: row.try_get("available")?,
            available_date: row.try_get("available_date")?,
            description: row.try_get("description")?,
            amenities: decode_amenities(amenities.as_deref()),
            image_url: row.try_get("image_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Decode the stored amenities column.
///
/// NULL, empty and malformed values all decode to an empty list.
pub fn decode_amenities(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => match serde_json::from_str::<Vec<String>>(text) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed amenities value");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

/// Encode amenities for storage as a JSON array.
pub fn encode_amenities(amenities: &[String]) -> String {
    serde_json::to_string(amenities).unwrap_or_else(|_| "[]".to_string())
}

/// DTO for creating a new property.
///
/// Required text fields default to empty so the engine can report which
/// one is missing instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProperty {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address_line1: String,
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    /// Defaults to [`DEFAULT_PROPERTY_TYPE`] if omitted.
    pub property_type: Option<String>,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: f64,
    pub square_feet: Option<i32>,
    #[serde(default)]
    pub monthly_rent: f64,
    pub deposit_amount: Option<f64>,
    /// Defaults to `true` if omitted.
    pub available: Option<bool>,
    pub available_date: Option<Date>,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing property. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    pub monthly_rent: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub available: Option<bool>,
    pub available_date: Option<Date>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Result of recomputing a property's `available` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilitySync {
    pub available: bool,
    /// Whether the stored flag differed from the recomputed one.
    pub changed: bool,
}

/// Filters for the public property listing. All filters AND-combine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub available: Option<bool>,
    /// Minimum number of bedrooms.
    pub min_bedrooms: Option<i32>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    /// Case-insensitive substring of name, first address line or city.
    pub search: Option<String>,
    /// Exact property type.
    pub property_type: Option<String>,
}
