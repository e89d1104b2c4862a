//! Input validation for sign-up and content fields.
//!
//! The rules mirror the stored schema constraints: title/body/name have a
//! minimum length of 3, passwords of 8, and emails must be syntactically
//! valid. Emails are normalized (trimmed, lowercased) before storage so the
//! unique constraint is case-insensitive in practice.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum length for titles, bodies, and display names.
pub const MIN_TEXT_LEN: usize = 3;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Normalize an email for storage and lookup: trim whitespace, lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a (normalized) email address syntactically.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation("Enter a valid email".into()))
    }
}

/// Require a field to be present and at least [`MIN_TEXT_LEN`] characters.
///
/// Length is counted in characters, not bytes, so multi-byte input is not
/// penalized.
pub fn validate_min_len(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() < MIN_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {MIN_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a password against the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
