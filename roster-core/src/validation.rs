//! Form validation rules.
//!
//! Name and email are required. Email must look like `local@domain.tld`;
//! phone is optional but, when present, must be a plausible international
//! number once spaces, dashes and parentheses are stripped.

use crate::error::ValidationError;
use crate::RecordFields;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("Invalid phone regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&digits)
}

/// Check trimmed fields, collecting every issue.
///
/// Returns the single issue directly when there is only one, otherwise a
/// [`ValidationError::Multiple`] in field order.
pub fn validate_fields(fields: &RecordFields) -> Result<(), ValidationError> {
    let fields = fields.trimmed();
    let mut errors = Vec::new();

    if fields.name.is_empty() {
        errors.push(ValidationError::RequiredFieldMissing { field: "name" });
    }
    if fields.email.is_empty() {
        errors.push(ValidationError::RequiredFieldMissing { field: "email" });
    } else if !is_valid_email(&fields.email) {
        errors.push(ValidationError::InvalidFormat { field: "email" });
    }
    if !fields.phone.is_empty() && !is_valid_phone(&fields.phone) {
        errors.push(ValidationError::InvalidFormat { field: "phone" });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
