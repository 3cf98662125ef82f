//! # Validate
//!
//! Input validation helpers: format predicates, a password policy engine
//! and schema-based validation of JSON values.
//!
//! ## Features
//!
//! - Predicates for domains, e-mail and IP addresses, HTTP headers, LDAP
//!   distinguished names, phone numbers and Windows paths
//! - Password evaluation against configurable requirements
//! - Recursive, depth-bounded schema validation with path-qualified errors
//! - A registry of named schemas with validators bound by name
//! - A single [`VALIDATE`] facade bundling all of the above

mod errors;
pub mod facade;
pub mod password;
pub mod registry;
pub mod schema;
pub mod validators;

pub use errors::{ValidationError, ValidationResult};
pub use facade::{Validate, VALIDATE};
pub use password::{
    is_valid_password, reset_password_requirements, set_password_requirements,
    validate_password, PasswordEvaluation, PasswordOptions, PasswordPolicy, PasswordRequirements,
};
pub use registry::{
    create_schema_validator, get_schema, update_schema, SchemaRegistry, SchemaValidator,
};
pub use schema::{Schema, SchemaType, SchemaValidationResult};

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::errors::{ValidationError, ValidationResult};
    pub use crate::facade::VALIDATE;
    pub use crate::password::{PasswordOptions, PasswordPolicy};
    pub use crate::registry::{SchemaRegistry, SchemaValidator};
    pub use crate::schema::{Schema, SchemaType, SchemaValidationResult};
    pub use crate::validators;
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum depth for nested objects and arrays
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Configuration for schema validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum depth for nested objects and arrays. Children below this
    /// depth are not checked.
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Get a new default configuration
pub fn default_config() -> ValidationConfig {
    ValidationConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(DEFAULT_MAX_DEPTH, 10);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
