//! Shared field validation helpers for create/update payloads.

use crate::error::CoreError;

/// Validate that a required text field is present and not blank.
pub fn require_non_empty(value: Option<&str>, name: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("{name} is required"))),
    }
}

/// Validate that a numeric amount (rent, deposit, bathrooms) is not negative.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be zero or greater, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a count (bedrooms, square feet) is not negative.
pub fn validate_non_negative_count(value: i32, name: &str) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{name} must be zero or greater, got {value}"
        )));
    }
    Ok(())
}

/// Minimal shape check for an email address: `local@domain` with both parts
/// non-empty. Deliverability is not our concern.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_values_are_rejected() {
        assert!(require_non_empty(None, "name").is_err());
        assert!(require_non_empty(Some(""), "name").is_err());
        assert!(require_non_empty(Some("   "), "name").is_err());
        assert!(require_non_empty(Some("Rose Cottage"), "name").is_ok());
    }

    #[test]
    fn required_error_names_the_field() {
        let err = require_non_empty(None, "city").unwrap_err();
        assert!(err.to_string().contains("city is required"));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_non_negative(0.0, "monthlyRent").is_ok());
        assert!(validate_non_negative(1250.5, "monthlyRent").is_ok());
        assert!(validate_non_negative(-0.01, "monthlyRent").is_err());
        assert!(validate_non_negative(f64::NAN, "monthlyRent").is_err());
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(validate_non_negative_count(0, "bedrooms").is_ok());
        assert!(validate_non_negative_count(-1, "bedrooms").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("jane").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }
}
