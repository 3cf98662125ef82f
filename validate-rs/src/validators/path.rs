//! Windows file name and path validation
//!
//! These are syntactic checks against the Windows naming rules only. The
//! filesystem is never consulted.

use super::has_breaks;
use super::string::has_control_characters;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FILE_NAME_FORBIDDEN: Regex = Regex::new(r#"["*:<>?/\\|]"#).unwrap();
    static ref PATH: Regex =
        Regex::new(r#"^(?:[A-Za-z]:\\|\\\\)(?:[^"*:<>?/\\|]+\\?)+$"#).unwrap();
    static ref PATH_WILDCARD: Regex =
        Regex::new(r#"^(?:[A-Za-z]:\\|\\\\)(?:[^":<>/\\|]+\\?)+$"#).unwrap();
}

/// Validate a Windows file name
///
/// Rejects blank names, control characters and any of `" * : < > ? / \ |`.
pub fn validate_windows_file_name(s: &str) -> bool {
    !s.trim().is_empty() && !has_control_characters(s) && !FILE_NAME_FORBIDDEN.is_match(s)
}

/// Validate an absolute Windows path
///
/// The path starts with a drive prefix (`c:\`) or a UNC prefix (`\\`)
/// followed by one or more `\`-separated segments. Segments may not
/// contain `" : < > / \ |`, nor `*` and `?` unless `use_wild_cards` is set.
pub fn validate_windows_path(s: &str, use_wild_cards: bool) -> bool {
    if s.trim().is_empty() || has_breaks(s) {
        return false;
    }

    if use_wild_cards {
        PATH_WILDCARD.is_match(s)
    } else {
        PATH.is_match(s)
    }
}
