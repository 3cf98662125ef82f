//! Format predicates
//!
//! Each predicate takes a string and answers whether it conforms to one
//! external format. Predicates are pure: they never mutate their input,
//! never fail and share no state beyond the compiled patterns.

pub mod header;
pub mod ldap;
pub mod network;
pub mod path;
pub mod string;

// Re-export all validators for convenience
pub use header::*;
pub use ldap::*;
pub use network::*;
pub use path::*;
pub use string::*;

/// Returns true if the string contains a carriage return or line feed
pub(crate) fn has_breaks(s: &str) -> bool {
    s.contains(['\r', '\n'])
}

/// Utility module for validation helpers
pub mod utils {
    use lazy_static::lazy_static;
    use regex::Regex;
    use std::borrow::Cow;
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    /// Get a regex from a pattern string, with caching for efficiency
    ///
    /// Compiled patterns live for the whole process. `Regex` clones share
    /// their compiled program, so handing out clones is cheap. Nothing is
    /// evicted: every distinct pattern, including those taken from
    /// registered schemas, stays cached until exit.
    pub fn get_regex(pattern: &str) -> Result<Regex, regex::Error> {
        lazy_static! {
            static ref REGEX_CACHE: Mutex<HashMap<String, Regex>> = Mutex::new(HashMap::new());
        }

        let mut cache = REGEX_CACHE.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(re) = cache.get(pattern) {
            return Ok(re.clone());
        }

        let compiled = Regex::new(pattern)?;
        cache.insert(pattern.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Rewrite the Perl classes `\d`, `\D`, `\w`, `\W` and the word
    /// boundaries `\b`, `\B` to their ASCII-only forms
    ///
    /// Inside a bracketed class `\d` and `\w` expand to ranges and the
    /// negations to nested classes. Other escapes are copied unchanged.
    pub fn ascii_classes(pattern: &str) -> Cow<'_, str> {
        if !pattern.contains('\\') {
            return Cow::Borrowed(pattern);
        }

        let mut out = String::with_capacity(pattern.len() + 16);
        let mut chars = pattern.chars().peekable();
        let mut class_depth = 0usize;
        // A `]` right after `[` or `[^` is a literal
        let mut class_opened = false;

        while let Some(c) = chars.next() {
            let literal_bracket = std::mem::take(&mut class_opened);
            match c {
                '\\' => {
                    let Some(escaped) = chars.next() else {
                        out.push(c);
                        break;
                    };
                    let in_class = class_depth > 0;
                    match (escaped, in_class) {
                        ('d', false) => out.push_str("[0-9]"),
                        ('d', true) => out.push_str("0-9"),
                        ('w', false) => out.push_str("[0-9A-Za-z_]"),
                        ('w', true) => out.push_str("0-9A-Za-z_"),
                        ('D', _) => out.push_str("[^0-9]"),
                        ('W', _) => out.push_str("[^0-9A-Za-z_]"),
                        ('b', false) => out.push_str(r"(?-u:\b)"),
                        ('B', false) => out.push_str(r"(?-u:\B)"),
                        _ => {
                            out.push(c);
                            out.push(escaped);
                        }
                    }
                }
                '[' => {
                    class_depth += 1;
                    out.push(c);
                    if chars.peek() == Some(&'^') {
                        chars.next();
                        out.push('^');
                    }
                    class_opened = true;
                }
                ']' if class_depth > 0 && !literal_bracket => {
                    class_depth -= 1;
                    out.push(c);
                }
                _ => out.push(c),
            }
        }

        Cow::Owned(out)
    }
}
