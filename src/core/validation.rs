//! Reusable field validators
//!
//! Small helpers shared by the model constructors and the service layer.
//! Each validator names the offending field so the HTTP layer can report
//! precise errors regardless of what the client already checked.

use crate::core::error::ValidationError;
use rust_decimal::Decimal;

/// Validate that a text field is present and not blank, returning the
/// trimmed value.
pub fn non_blank(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::FieldError {
            field: field.to_string(),
            message: "must not be blank".to_string(),
        })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validate that a monetary field is not negative (line item prices)
pub fn non_negative(field: &str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("must not be negative (value: {})", value),
        })
    } else {
        Ok(value)
    }
}

/// Validate that a monetary field is strictly positive (payment amounts)
pub fn positive(field: &str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("must be positive (value: {})", value),
        })
    } else {
        Ok(value)
    }
}
