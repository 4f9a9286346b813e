//! # Validation Module
//!
//! Input validation for locally entered data and required identifiers.
//! Runs before any I/O; a failure here means no table access happened.

use crate::error::ValidationError;
use crate::MAX_COMPANY_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that a required identifier is present and non-blank.
///
/// ## Example
/// ```rust
/// use caravan_core::validation::require_id;
///
/// assert!(require_id("account_id", "a1b2").is_ok());
/// assert!(require_id("account_id", "").is_err());
/// assert!(require_id("account_id", "   ").is_err());
/// ```
pub fn require_id(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an account company name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most [`MAX_COMPANY_NAME_LEN`] characters
pub fn validate_company_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "company_name".to_string(),
        });
    }

    if name.len() > MAX_COMPANY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "company_name".to_string(),
            max: MAX_COMPANY_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id_rejects_blank() {
        assert!(require_id("id", "abc").is_ok());
        assert_eq!(
            require_id("id", ""),
            Err(ValidationError::Required { field: "id".into() })
        );
        assert_eq!(
            require_id("id", " \t "),
            Err(ValidationError::Required { field: "id".into() })
        );
    }

    #[test]
    fn test_validate_company_name() {
        assert!(validate_company_name("Wayne Enterprises").is_ok());
        assert!(validate_company_name("").is_err());
        assert!(validate_company_name(&"x".repeat(MAX_COMPANY_NAME_LEN + 1)).is_err());
    }
}
