//! Input validation for clubboard member registration.
//!
//! Lengths are counted in characters, not bytes. A value made only of
//! whitespace counts as missing.

use thiserror::Error;

use super::password::MAX_PASSWORD_LENGTH;

/// Maximum identifier length.
pub const MAX_ID_LENGTH: usize = 50;

/// Maximum display name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum nickname length.
pub const MAX_NICKNAME_LENGTH: usize = 50;

/// Maximum phone number length.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum character count.
        max: usize,
    },

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Check whether a value is absent or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Require a non-blank value.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

/// Enforce a maximum character count.
pub fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn required_with_max(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    require(field, value)?;
    check_length(field, value, max)
}

/// Validate a login identifier.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    required_with_max("id", id, MAX_ID_LENGTH)
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    required_with_max("name", name, MAX_NAME_LENGTH)
}

/// Validate a password and its confirmation.
pub fn validate_password(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    require("password", password)?;
    require("confirm_password", confirm_password)?;
    check_length("password", password, MAX_PASSWORD_LENGTH)?;
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    required_with_max("email", email, MAX_EMAIL_LENGTH)
}

/// Validate a nickname.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    required_with_max("nickname", nickname, MAX_NICKNAME_LENGTH)
}

/// Validate an optional phone number. Blank is treated as absent.
pub fn validate_phone(phone: Option<&str>) -> Result<(), ValidationError> {
    match phone {
        Some(p) if !is_blank(p) => check_length("phone_number", p, MAX_PHONE_LENGTH),
        _ => Ok(()),
    }
}
