//! Aggregate entry point
//!
//! [`VALIDATE`] bundles every public operation under a short name. Each
//! field points at the same function that is exported from its own module,
//! so `VALIDATE.email` and [`validate_email_address`] are interchangeable.

use crate::errors::ValidationResult;
use crate::password::{
    is_valid_password, reset_password_requirements, set_password_requirements,
    validate_password, PasswordEvaluation, PasswordOptions,
};
use crate::registry::{create_schema_validator, get_schema, update_schema, SchemaValidator};
use crate::schema::Schema;
use crate::validators::{
    has_control_characters, has_lower_case, has_number, has_special, has_upper_case,
    validate_domain, validate_email_address, validate_header, validate_header_name,
    validate_header_value, validate_int, validate_ip_address, validate_ipv4, validate_ipv6,
    validate_ldap_dn, validate_phone_number, validate_windows_file_name, validate_windows_path,
};

/// Table of every public validation operation
#[derive(Clone, Copy)]
pub struct Validate {
    pub domain: fn(&str, bool) -> bool,
    pub email: fn(&str, bool) -> bool,
    pub header: fn(&str) -> bool,
    pub header_name: fn(&str) -> bool,
    pub header_value: fn(&str) -> bool,
    pub ip: fn(&str, bool) -> bool,
    pub ipv4: fn(&str) -> bool,
    pub ipv6: fn(&str) -> bool,
    pub is_int: fn(&str) -> bool,
    pub ldap_dn: fn(&str) -> bool,
    pub password: fn(&str, bool, Option<usize>, Option<usize>) -> PasswordEvaluation,
    pub is_valid_password: fn(&str, bool, Option<usize>, Option<usize>) -> bool,
    pub phone_number: fn(&str) -> bool,
    pub windows_file_name: fn(&str) -> bool,
    pub windows_path: fn(&str, bool) -> bool,
    pub has_upper_case: fn(&str) -> bool,
    pub has_lower_case: fn(&str) -> bool,
    pub has_number: fn(&str) -> bool,
    pub has_special: fn(&str) -> bool,
    pub has_control_characters: fn(&str) -> bool,
    pub set_password_requirements: fn(&PasswordOptions) -> bool,
    pub reset_password_requirements: fn(),
    pub get_schema: fn(&str) -> Option<Schema>,
    pub update_schema: fn(&str, &Schema) -> ValidationResult<()>,
    pub create_schema_validator: fn(&str, &Schema) -> ValidationResult<SchemaValidator>,
}

pub static VALIDATE: Validate = Validate {
    domain: validate_domain,
    email: validate_email_address,
    header: validate_header,
    header_name: validate_header_name,
    header_value: validate_header_value,
    ip: validate_ip_address,
    ipv4: validate_ipv4,
    ipv6: validate_ipv6,
    is_int: validate_int,
    ldap_dn: validate_ldap_dn,
    password: validate_password,
    is_valid_password,
    phone_number: validate_phone_number,
    windows_file_name: validate_windows_file_name,
    windows_path: validate_windows_path,
    has_upper_case,
    has_lower_case,
    has_number,
    has_special,
    has_control_characters,
    set_password_requirements,
    reset_password_requirements,
    get_schema,
    update_schema,
    create_schema_validator,
};

impl std::fmt::Debug for Validate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Validate { .. }")
    }
}
