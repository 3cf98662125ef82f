//! HTTP header validators

use super::has_breaks;
use super::string::has_control_characters;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADER_NAME: Regex = Regex::new(r"^[A-Za-z-]+$").unwrap();
}

/// Validate an HTTP header name: ASCII letters and hyphens only, with no
/// leading or trailing hyphen
pub fn validate_header_name(name: &str) -> bool {
    !name.is_empty()
        && !has_control_characters(name)
        && HEADER_NAME.is_match(name)
        && !name.starts_with('-')
        && !name.ends_with('-')
}

/// Validate an HTTP header value: anything non-empty without a line break
pub fn validate_header_value(value: &str) -> bool {
    !value.is_empty() && !has_breaks(value)
}

/// Validate a complete `name: value` header line
///
/// The line is split on the first `:`; both halves are trimmed before
/// being checked.
pub fn validate_header(header: &str) -> bool {
    match header.split_once(':') {
        Some((name, value)) => {
            validate_header_name(name.trim()) && validate_header_value(value.trim())
        }
        None => false,
    }
}
