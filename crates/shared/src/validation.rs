//! Common validation utilities.

use validator::ValidationError;

/// Validates that a text field contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a CMS placeholder slot name: 1-100 chars of `[a-z0-9_-]`.
pub fn validate_slot_name(slot: &str) -> Result<(), ValidationError> {
    let valid = !slot.is_empty()
        && slot.len() <= 100
        && slot
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("slot_name");
        err.message =
            Some("Placeholder names use lowercase letters, digits, '-' and '_' (max 100)".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank_accepts_text() {
        assert!(validate_not_blank("Scheduled maintenance").is_ok());
        assert!(validate_not_blank("  padded  ").is_ok());
    }

    #[test]
    fn test_not_blank_rejects_empty_and_whitespace() {
        assert!(validate_not_blank("").is_err());
        let err = validate_not_blank(" \t\n").unwrap_err();
        assert_eq!(err.code, "required");
    }

    #[test]
    fn test_slot_name_valid() {
        assert!(validate_slot_name("home-sidebar").is_ok());
        assert!(validate_slot_name("news_2024").is_ok());
    }

    #[test]
    fn test_slot_name_invalid() {
        assert!(validate_slot_name("").is_err());
        assert!(validate_slot_name("Home Sidebar").is_err());
        assert!(validate_slot_name("a/b").is_err());
        assert!(validate_slot_name(&"x".repeat(101)).is_err());
    }
}
