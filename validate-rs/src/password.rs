//! Password policy engine
//!
//! A [`PasswordPolicy`] holds one set of [`PasswordRequirements`] and
//! evaluates passwords against it. Until requirements are set explicitly the
//! policy is *unconfigured*: lower case, upper case and digits are always
//! checked, special characters only on request, and length only when bounds
//! are passed to the call. Once configured, only the requirements that are
//! switched on are checked.
//!
//! The free functions at the bottom of this module operate on a process-wide
//! default policy.

use crate::validators::{has_lower_case, has_number, has_special, has_upper_case};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{PoisonError, RwLock};

/// Partial update of password requirements
///
/// Fields left as `None` keep their current value. A length bound of `0`
/// clears that bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordOptions {
    pub upper: Option<bool>,
    pub lower: Option<bool>,
    pub number: Option<bool>,
    pub special: Option<bool>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// Stored password requirements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub require_upper: bool,
    pub require_lower: bool,
    pub require_number: bool,
    pub require_special: bool,
    pub require_min_length: Option<usize>,
    pub require_max_length: Option<usize>,
    /// Whether requirements were ever set successfully since the last reset
    pub set_by_user: bool,
}

impl PasswordRequirements {
    /// Overwrite every field that `options` defines
    fn apply(&mut self, options: &PasswordOptions) {
        if let Some(upper) = options.upper {
            self.require_upper = upper;
        }
        if let Some(lower) = options.lower {
            self.require_lower = lower;
        }
        if let Some(number) = options.number {
            self.require_number = number;
        }
        if let Some(special) = options.special {
            self.require_special = special;
        }
        if let Some(min) = options.min {
            self.require_min_length = positive(Some(min));
        }
        if let Some(max) = options.max {
            self.require_max_length = positive(Some(max));
        }
    }

    /// A maximum length, when both bounds are set, must exceed the minimum
    fn has_valid_length_bounds(&self) -> bool {
        match (self.require_min_length, self.require_max_length) {
            (Some(min), Some(max)) => max > min,
            _ => true,
        }
    }
}

/// Result of evaluating a password
///
/// Every check is optional: `None` means the check was not performed and
/// does not count against the password, which is distinct from
/// `Some(false)`. Serializes to JSON with absent checks omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasswordEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<bool>,
    /// Length in UTF-16 code units
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<bool>,
}

impl PasswordEvaluation {
    /// True when every check that was performed passed
    pub fn is_valid(&self) -> bool {
        [
            self.special,
            self.lower,
            self.upper,
            self.number,
            self.min,
            self.max,
        ]
        .iter()
        .all(|check| check.unwrap_or(true))
    }
}

/// Checks selected for one evaluation
struct Checks {
    lower: bool,
    upper: bool,
    number: bool,
    /// Special characters must be present
    special: bool,
    /// Whether the special field is reported at all
    report_special: bool,
    min: Option<usize>,
    max: Option<usize>,
}

impl Checks {
    fn select(
        requirements: &PasswordRequirements,
        require_special: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let min_length = positive(min_length);
        let max_length = positive(max_length);

        if requirements.set_by_user {
            let special = requirements.require_special || require_special;
            Self {
                lower: requirements.require_lower,
                upper: requirements.require_upper,
                number: requirements.require_number,
                special,
                report_special: special,
                min: min_length.or(requirements.require_min_length),
                max: max_length.or(requirements.require_max_length),
            }
        } else {
            Self {
                lower: true,
                upper: true,
                number: true,
                special: require_special,
                report_special: true,
                min: min_length,
                max: max_length,
            }
        }
    }

    fn evaluate(&self, password: &str) -> PasswordEvaluation {
        // UTF-16 code units, so astral characters count twice
        let length = password.encode_utf16().count();
        let when = |enabled: bool, check: fn(&str) -> bool| enabled.then(|| check(password));

        PasswordEvaluation {
            special: self
                .report_special
                .then(|| !self.special || has_special(password)),
            lower: when(self.lower, has_lower_case),
            upper: when(self.upper, has_upper_case),
            number: when(self.number, has_number),
            length,
            min: self.min.map(|min| length >= min),
            max: self.max.map(|max| length <= max),
        }
    }

    /// Shape reported for input that is not a string at all
    fn reject(&self) -> PasswordEvaluation {
        PasswordEvaluation {
            special: self.report_special.then_some(false),
            lower: self.lower.then_some(false),
            upper: self.upper.then_some(false),
            number: self.number.then_some(false),
            length: 0,
            min: self.min.map(|_| false),
            max: self.max.map(|_| false),
        }
    }
}

fn positive(bound: Option<usize>) -> Option<usize> {
    bound.filter(|n| *n > 0)
}

/// A password policy with its own mutable requirements
#[derive(Debug, Default)]
pub struct PasswordPolicy {
    requirements: RwLock<PasswordRequirements>,
}

impl PasswordPolicy {
    /// Create an unconfigured policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current requirements
    pub fn requirements(&self) -> PasswordRequirements {
        *self
            .requirements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge `options` into the stored requirements
    ///
    /// Returns false when the merged minimum and maximum lengths conflict.
    /// Fields merged before the conflict was detected stay applied and the
    /// policy keeps its previous configured/unconfigured state.
    pub fn set_requirements(&self, options: &PasswordOptions) -> bool {
        let mut requirements = self
            .requirements
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        requirements.apply(options);

        if !requirements.has_valid_length_bounds() {
            log::error!(
                "Invalid password requirements: maximum length {:?} must exceed minimum length {:?}",
                requirements.require_max_length,
                requirements.require_min_length
            );
            return false;
        }

        requirements.set_by_user = true;
        true
    }

    /// Restore the unconfigured defaults
    pub fn reset(&self) {
        *self
            .requirements
            .write()
            .unwrap_or_else(PoisonError::into_inner) = PasswordRequirements::default();
    }

    /// Evaluate a password
    ///
    /// `require_special` forces the special-character check on. Length
    /// bounds passed here take priority over stored ones; `None` or `0`
    /// means no bound was passed.
    pub fn evaluate(
        &self,
        password: &str,
        require_special: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> PasswordEvaluation {
        Checks::select(&self.requirements(), require_special, min_length, max_length)
            .evaluate(password)
    }

    /// Evaluate a dynamically typed value
    ///
    /// Anything other than a JSON string fails every check that would have
    /// been performed and reports a length of zero.
    pub fn evaluate_value(
        &self,
        value: &Value,
        require_special: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> PasswordEvaluation {
        let checks = Checks::select(&self.requirements(), require_special, min_length, max_length);
        match value {
            Value::String(password) => checks.evaluate(password),
            _ => checks.reject(),
        }
    }

    /// True when the password passes every check that applies
    pub fn is_valid(
        &self,
        password: &str,
        require_special: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> bool {
        self.evaluate(password, require_special, min_length, max_length)
            .is_valid()
    }
}

lazy_static! {
    static ref DEFAULT_POLICY: PasswordPolicy = PasswordPolicy::new();
}

/// The process-wide policy used by the free functions
pub fn default_policy() -> &'static PasswordPolicy {
    &DEFAULT_POLICY
}

/// Evaluate a password against the default policy
pub fn validate_password(
    password: &str,
    require_special: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> PasswordEvaluation {
    DEFAULT_POLICY.evaluate(password, require_special, min_length, max_length)
}

/// Check a password against the default policy
pub fn is_valid_password(
    password: &str,
    require_special: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> bool {
    DEFAULT_POLICY.is_valid(password, require_special, min_length, max_length)
}

/// Merge options into the default policy's requirements
pub fn set_password_requirements(options: &PasswordOptions) -> bool {
    DEFAULT_POLICY.set_requirements(options)
}

/// Reset the default policy
pub fn reset_password_requirements() {
    DEFAULT_POLICY.reset()
}
