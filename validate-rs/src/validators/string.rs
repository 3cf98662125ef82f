//! String validators
//!
//! Character-class membership checks used by the password policy, plus
//! the integer and phone-number literal predicates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UPPER_CASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWER_CASE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref NUMBER: Regex = Regex::new(r"[0-9]").unwrap();
    // ASCII punctuation and symbols: ! through /, : through @, [ through `, { through ~
    static ref SPECIAL: Regex = Regex::new(r"[!-/:-@\[-`{-~]").unwrap();
    // backspace, vertical tab, form feed, tab, CR, LF
    static ref CONTROL_CHARACTERS: Regex = Regex::new(r"[\x08\x0B\x0C\t\r\n]").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^[0-9]*$").unwrap();
    static ref PHONE_NUMBER: Regex = Regex::new(r"^\+?[0-9)( -]{5,20}$").unwrap();
}

/// Returns true if the string contains an ASCII upper case letter
pub fn has_upper_case(s: &str) -> bool {
    UPPER_CASE.is_match(s)
}

/// Returns true if the string contains an ASCII lower case letter
pub fn has_lower_case(s: &str) -> bool {
    LOWER_CASE.is_match(s)
}

/// Returns true if the string contains an ASCII digit
pub fn has_number(s: &str) -> bool {
    NUMBER.is_match(s)
}

/// Returns true if the string contains an ASCII punctuation or symbol
/// character. Whitespace never counts as special.
pub fn has_special(s: &str) -> bool {
    SPECIAL.is_match(s)
}

/// Returns true if the string contains a backspace, form feed, tab,
/// vertical tab, carriage return or line feed
pub fn has_control_characters(s: &str) -> bool {
    CONTROL_CHARACTERS.is_match(s)
}

/// Validate that a string is a non-empty run of ASCII digits
pub fn validate_int(value: &str) -> bool {
    !value.is_empty() && INTEGER.is_match(value)
}

/// Validate a phone number: an optional leading `+` followed by 5 to 20
/// digits, spaces, hyphens or parentheses
pub fn validate_phone_number(s: &str) -> bool {
    PHONE_NUMBER.is_match(s)
}
