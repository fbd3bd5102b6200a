//! Length validation shared by the text value objects

use crate::config::TextLimits;
use crate::error::ValidationError;

/// Validator for a single named text field
#[derive(Debug, Clone, Copy)]
pub struct TextValidator {
    field: &'static str,
    limits: TextLimits,
}

impl TextValidator {
    /// Create a validator for a field with the given bounds
    pub fn new(field: &'static str, limits: TextLimits) -> Self {
        Self { field, limits }
    }

    /// Validate and normalize input, returning the trimmed value
    ///
    /// Length is measured in characters after trimming.
    pub fn validate(&self, value: &str) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: self.field });
        }

        let actual = trimmed.chars().count();
        if actual < self.limits.min {
            return Err(ValidationError::TooShort {
                field: self.field,
                min: self.limits.min,
                actual,
            });
        }
        if actual > self.limits.max {
            return Err(ValidationError::TooLong {
                field: self.field,
                max: self.limits.max,
                actual,
            });
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> TextValidator {
        TextValidator::new("comment text", TextLimits::new(2, 10))
    }

    #[test]
    fn test_validate_valid() {
        assert_eq!(validator().validate("yeah").unwrap(), "yeah");
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(
            validator().validate("   "),
            Err(ValidationError::Empty { field: "comment text" })
        );
    }

    #[test]
    fn test_validate_too_short() {
        assert!(matches!(
            validator().validate("a"),
            Err(ValidationError::TooShort { min: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(matches!(
            validator().validate("this is far too long"),
            Err(ValidationError::TooLong { max: 10, .. })
        ));
    }

    #[test]
    fn test_validate_trims_whitespace() {
        assert_eq!(validator().validate("  ok  ").unwrap(), "ok");
    }

    #[test]
    fn test_length_counts_characters() {
        // 10 characters, 20 bytes
        assert!(validator().validate("éééééééééé").is_ok());
    }
}
