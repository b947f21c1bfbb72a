//! Input validation for key names.
//!
//! Validators return the field errors they find instead of failing fast, so
//! a request can report every problem at once.

use crate::core::config::NamePolicy;
use crate::core::constants::FIELD_KEY_NAME;
use crate::error::{FieldError, Result, ValidationErrors};

/// Validate a secret or device name against the length policy.
///
/// Returns exactly one error on `key_name` when the name is absent, empty,
/// or outside `[min_name_length, max_name_length]` characters.
pub fn validate_key_name(name: Option<&str>, policy: &NamePolicy) -> Vec<FieldError> {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return vec![FieldError::new(FIELD_KEY_NAME, "KeyName is required")],
    };

    let len = name.chars().count();
    if len < policy.min_name_length || len > policy.max_name_length {
        return vec![FieldError::new(
            FIELD_KEY_NAME,
            format!(
                "KeyName must be between {} and {} characters",
                policy.min_name_length, policy.max_name_length
            ),
        )];
    }

    Vec::new()
}

/// Turn collected field errors into a result.
pub fn into_result(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors).into())
    }
}
