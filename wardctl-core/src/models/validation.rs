//! Validation error types

use thiserror::Error;

/// Validation error for domain models.
///
/// Raised at construction time, before any storage access.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Numeric field below its minimum
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: f64,
        value: f64,
    },

    /// Numeric field outside an inclusive range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// String doesn't match the required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum label
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// Payment card has expired
    #[error("card expired on {expired}")]
    CardExpired { expired: chrono::NaiveDate },
}

/// Reject empty or whitespace-only strings.
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::BelowMinimum {
            field: "daily rate",
            min: 1.0,
            value: 0.5,
        };
        assert_eq!(err.to_string(), "daily rate must be at least 1, got 0.5");

        let err = ValidationError::InvalidVariant {
            field: "room type",
            value: "Suite".into(),
        };
        assert_eq!(err.to_string(), "invalid room type value: 'Suite'");
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("name", "  Ada  ").unwrap(), "Ada");
        assert_eq!(
            non_empty("name", "   ").unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }
}
