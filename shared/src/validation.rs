use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::{MAX_KEY_LENGTH, MAX_VALUE_LENGTH};

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-]+$").expect("key pattern is valid")
});

fn validate_identifier(value: &str, code: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > MAX_KEY_LENGTH || !KEY_PATTERN.is_match(value) {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

pub fn validate_storage_key(key: &str) -> Result<(), ValidationError> {
    validate_identifier(key, "invalid_storage_key")
}

/// Visitor ids are uuids in practice but any key-shaped id is accepted
pub fn validate_visitor_id(visitor: &str) -> Result<(), ValidationError> {
    validate_identifier(visitor, "invalid_visitor_id")
}

pub fn validate_storage_value(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_VALUE_LENGTH {
        return Err(ValidationError::new("storage_value_too_long"));
    }
    Ok(())
}
