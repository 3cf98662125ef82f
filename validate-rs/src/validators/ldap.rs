//! LDAP distinguished name validation

use super::has_breaks;
use lazy_static::lazy_static;
use regex::Regex;

/// Attribute types allowed in the leading clause: CN, UID and their OIDs
const LEADING_ATTRIBUTES: &str = r"(?:CN|2\.5\.4\.3|UID|0\.9\.2342\.19200300\.100\.1\.1)";

/// Attribute types allowed in the middle clauses: CN, OU and their OIDs
const MIDDLE_ATTRIBUTES: &str = r"(?:CN|OU|2\.5\.4\.3|2\.5\.4\.11)";

/// Attribute types allowed in the closing clauses: DC and its OID
const DOMAIN_ATTRIBUTES: &str = r"(?:DC|0\.9\.2342\.19200300\.100\.1\.25)";

lazy_static! {
    static ref LDAP_DN: Regex = Regex::new(&ldap_dn_pattern()).unwrap();
}

fn ldap_dn_pattern() -> String {
    let clause = |attributes: &str| format!(r"{}\s*=\s*[^,=\s][^,]*", attributes);
    let lead = clause(LEADING_ATTRIBUTES);
    let middle = clause(MIDDLE_ATTRIBUTES);
    let domain = clause(DOMAIN_ATTRIBUTES);
    let sep = r"\s*,\s*";

    format!(
        r"(?i)^\s*(?:{lead}(?:{sep}{middle})*(?:{sep}{domain})*|{middle}(?:{sep}{middle})*(?:{sep}{domain})*|{domain}(?:{sep}{domain})*)\s*$",
        lead = lead,
        middle = middle,
        domain = domain,
        sep = sep,
    )
}

/// Validate an LDAP distinguished name
///
/// A DN is an optional `CN=`/`UID=` clause, then any number of `CN=`/`OU=`
/// clauses, then any number of `DC=` clauses, with at least one clause
/// overall. Attribute types may be given by name or OID and are matched
/// case-insensitively; whitespace is tolerated around `=` and `,`.
pub fn validate_ldap_dn(s: &str) -> bool {
    !s.trim().is_empty() && !has_breaks(s) && LDAP_DN.is_match(s)
}
