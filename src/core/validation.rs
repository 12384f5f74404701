//! Validation for waitlist email addresses
//!
//! The accepted shape is intentionally loose: `local@domain.tld`, with a single
//! `@`, no whitespace, and a dot in the domain that has characters on both sides.

use thiserror::Error;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Email is empty
    #[error("Please enter your email address")]
    Empty,
    /// Email does not look like `local@domain.tld`
    #[error("Please enter a valid email address")]
    Malformed,
}

/// Validate an email address.
///
/// Surrounding whitespace is ignored. Returns the trimmed address on success.
pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty);
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::Malformed);
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::Malformed);
    };

    if local.is_empty() || !has_inner_dot(domain) {
        return Err(ValidationError::Malformed);
    }

    Ok(email)
}

/// Check if an email address is valid
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}

/// A dot with at least one character before and after it
fn has_inner_dot(domain: &str) -> bool {
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Transient validation state of an email input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValidation {
    /// Not validated yet, or edited since the last check
    #[default]
    Untouched,
    Valid,
    Invalid(ValidationError),
}

impl FieldValidation {
    /// Validation state after the input lost focus
    pub fn on_blur(value: &str) -> Self {
        // An empty field that was only focused is not an error yet
        if value.trim().is_empty() {
            return Self::Untouched;
        }
        Self::check(value)
    }

    /// Validation state for an explicit check (submit or re-validation)
    pub fn check(value: &str) -> Self {
        match validate_email(value) {
            Ok(_) => Self::Valid,
            Err(e) => Self::Invalid(e),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Message to show next to the input, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Invalid(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Email Shape Tests
    // ========================================================================

    #[test]
    fn test_accepts_simple_email() {
        assert_eq!(validate_email("a@b.co"), Ok("a@b.co"));
        assert!(is_valid_email("jane.doe+news@mail.example.org"));
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(validate_email("  a@b.co\n"), Ok("a@b.co"));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_email(""), Err(ValidationError::Empty));
        assert_eq!(validate_email("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_rejects_missing_dot_in_domain() {
        assert_eq!(validate_email("a@b"), Err(ValidationError::Malformed));
    }

    #[test]
    fn test_rejects_double_at() {
        assert_eq!(validate_email("a@@b.com"), Err(ValidationError::Malformed));
        assert_eq!(validate_email("a@b@c.com"), Err(ValidationError::Malformed));
    }

    #[test]
    fn test_rejects_missing_parts() {
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("ab.co"));
    }

    #[test]
    fn test_rejects_inner_whitespace() {
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@c .co"));
    }

    #[test]
    fn test_dot_anywhere_inside_domain() {
        assert!(is_valid_email("a@b.c."));
        assert!(is_valid_email("a@sub.b.co"));
    }

    // ========================================================================
    // Field State Tests
    // ========================================================================

    #[test]
    fn test_blur_on_empty_field_stays_untouched() {
        assert_eq!(FieldValidation::on_blur(""), FieldValidation::Untouched);
        assert_eq!(FieldValidation::on_blur("  "), FieldValidation::Untouched);
    }

    #[test]
    fn test_blur_with_bad_value_is_invalid() {
        let state = FieldValidation::on_blur("a@b");
        assert!(state.is_invalid());
        assert_eq!(
            state.message(),
            Some("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn test_check_reports_empty() {
        assert_eq!(
            FieldValidation::check(""),
            FieldValidation::Invalid(ValidationError::Empty)
        );
    }

    #[test]
    fn test_valid_state_has_no_message() {
        let state = FieldValidation::check("a@b.co");
        assert_eq!(state, FieldValidation::Valid);
        assert!(state.message().is_none());
        assert!(!state.is_invalid());
    }
}
