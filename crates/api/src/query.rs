//! Query parameter types for list endpoints.
//!
//! Values arrive as raw strings and are parsed here, so each endpoint
//! decides how strict to be instead of failing in the extractor.

use rentals_core::error::CoreError;
use rentals_core::lease::LeaseStatus;
use rentals_core::types::DbId;
use rentals_db::models::lease::LeaseFilter;
use rentals_db::models::property::PropertyFilter;
use serde::Deserialize;

/// Public property search (`?available=&beds=&minRent=&maxRent=&search=&type=`).
///
/// Unparseable numeric or boolean values are ignored as if absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchParams {
    pub available: Option<String>,
    pub beds: Option<String>,
    pub min_rent: Option<String>,
    pub max_rent: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
}

impl PropertySearchParams {
    pub fn into_filter(self) -> PropertyFilter {
        PropertyFilter {
            available: lenient(self.available.as_deref()),
            min_bedrooms: lenient(self.beds.as_deref()),
            min_rent: lenient(self.min_rent.as_deref()),
            max_rent: lenient(self.max_rent.as_deref()),
            search: non_blank(self.search),
            property_type: non_blank(self.property_type),
        }
    }
}

/// Admin lease listing (`?status=&propertyId=&tenantId=`).
///
/// Unlike the public search, a value that does not parse is a validation error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseListParams {
    pub status: Option<String>,
    pub property_id: Option<String>,
    pub tenant_id: Option<String>,
}

impl LeaseListParams {
    pub fn into_filter(self) -> Result<LeaseFilter, CoreError> {
        let status = non_blank(self.status)
            .map(|s| LeaseStatus::parse(&s))
            .transpose()?;
        Ok(LeaseFilter {
            status,
            property_id: strict_id(self.property_id, "propertyId")?,
            tenant_id: strict_id(self.tenant_id, "tenantId")?,
        })
    }
}

fn lenient<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn strict_id(value: Option<String>, name: &str) -> Result<Option<DbId>, CoreError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("Invalid {name} '{raw}'"))),
    }
}
