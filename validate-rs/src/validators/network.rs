//! Network address validators
//!
//! Domain names, e-mail addresses and IP addresses. No lookups are
//! performed; every check is purely syntactic.

use super::string::has_control_characters;
use lazy_static::lazy_static;
use regex::Regex;

/// Characters that wildcard mode accepts in place of address components
pub const WILDCARD_CHARACTERS: [char; 3] = ['*', '#', '?'];

/// Decimal octet 0-255 without leading zeros
const DEC_OCTET: &str = "(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])";

/// Decimal octet 0-255, leading zeros tolerated
const LOOSE_OCTET: &str = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

/// One IPv6 group of up to four hex digits
const H16: &str = "[0-9A-Fa-f]{1,4}";

lazy_static! {
    static ref DOMAIN_FORBIDDEN: Regex = Regex::new(r"[()<>\[\]:;@ ]").unwrap();
    static ref DOMAIN: Regex = Regex::new(r"^[0-9a-zA-Z.-]+\.[0-9a-zA-Z.-]+$").unwrap();
    static ref DOMAIN_WILDCARD: Regex = Regex::new(r"^[0-9a-zA-Z.?*#-]+\.[0-9a-zA-Z.?*#-]+$").unwrap();

    static ref EMAIL: Regex = Regex::new(concat!(
        r#"^(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*|"[^"\\]+")"#,
        r"@(?:\[(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])){3}\]",
        r"|(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,})$",
    ))
    .unwrap();

    static ref IPV4: Regex = Regex::new(&format!(r"^(?:{o}\.){{3}}{o}$", o = DEC_OCTET)).unwrap();
    static ref IPV4_CIDR: Regex =
        Regex::new(&format!(r"^(?:{o}\.){{3}}{o}/(?:3[012]|[12]?[0-9])$", o = LOOSE_OCTET)).unwrap();
    static ref IPV6: Regex = Regex::new(&ipv6_pattern()).unwrap();
    static ref HOSTNAME: Regex = Regex::new(
        r"^(?:(?:[a-zA-Z]|[a-zA-Z][a-zA-Z0-9-]*[a-zA-Z0-9])\.)*(?:[A-Za-z]|[A-Za-z][A-Za-z0-9-]*[A-Za-z0-9])$"
    )
    .unwrap();
}

/// Builds the IPv6 acceptance pattern: full, compressed and IPv4-suffixed
/// forms, an optional `%zone`, and surrounding whitespace
fn ipv6_pattern() -> String {
    let v4 = format!(r"{o}(?:\.{o}){{3}}", o = DEC_OCTET);

    let mut forms = vec![
        format!("(?:{h}:){{7}}(?:{h}|:)", h = H16),
        format!("(?:{h}:){{6}}(?::{h}|{v4}|:)", h = H16, v4 = v4),
    ];

    // k explicit leading groups, then "::" and up to 7 - k trailing groups
    for k in (0..=5usize).rev() {
        let head = if k == 0 {
            ":".to_string()
        } else {
            format!("(?:{h}:){{{k}}}", h = H16, k = k)
        };
        forms.push(format!(
            "{head}(?:(?::{h}){{1,{tail}}}|(?::{h}){{0,{v4_tail}}}:{v4}|:)",
            head = head,
            h = H16,
            tail = 7 - k,
            v4_tail = 5 - k,
            v4 = v4,
        ));
    }

    format!(r"^\s*(?:{})(?:%.+)?\s*$", forms.join("|"))
}

/// Validate a domain name
///
/// At least two dot-separated label groups made of ASCII alphanumerics,
/// dots and hyphens. With `use_wild_cards`, `*`, `?` and `#` are also
/// accepted inside labels.
pub fn validate_domain(domain: &str, use_wild_cards: bool) -> bool {
    if has_control_characters(domain) || DOMAIN_FORBIDDEN.is_match(domain) {
        return false;
    }

    if use_wild_cards {
        DOMAIN_WILDCARD.is_match(domain)
    } else {
        DOMAIN.is_match(domain)
    }
}

/// Validate an e-mail address of the form `local@domain`
///
/// The local part is either a dot-separated run of unquoted atoms or a
/// quoted string; the domain is a bracketed IPv4 literal or a dotted name
/// ending in an alphabetic label of two or more letters. Surrounding
/// whitespace is trimmed.
///
/// Wildcard addresses (containing `*` or `?` with `use_wild_cards`) have
/// never produced a verdict and are rejected.
pub fn validate_email_address(email: &str, use_wild_cards: bool) -> bool {
    if use_wild_cards && email.contains(['*', '?']) {
        log::warn!("Wildcard e-mail address '{}' cannot be validated", email);
        return false;
    }

    EMAIL.is_match(email.trim())
}

/// Validate a dotted-quad IPv4 address with an optional `/0`-`/32` suffix
pub fn validate_ipv4(ip: &str) -> bool {
    IPV4.is_match(ip) || IPV4_CIDR.is_match(ip)
}

/// Validate an IPv6 address, optionally with a zone and a `/0`-`/128`
/// CIDR suffix
pub fn validate_ipv6(ip: &str) -> bool {
    IPV6.is_match(strip_cidr_suffix(ip))
}

/// Validate an IP address, hostname-like label list or CIDR block
///
/// Without wildcards the input must contain a digit and match one of:
/// dotted-quad IPv4, hostname labels, IPv6 (CIDR suffix stripped), or
/// IPv4 with a CIDR suffix.
///
/// With wildcards, an address containing `*`, `#` or `?` only needs the
/// right number of separators: three dots for IPv4, three colons for
/// IPv6. Octet and group values are not checked. Addresses without a
/// wildcard fall through to the strict check.
pub fn validate_ip_address(ip: &str, use_wild_cards: bool) -> bool {
    if use_wild_cards && ip.contains(WILDCARD_CHARACTERS) {
        return if looks_like_ipv6(ip) {
            ip.matches(':').count() >= 3
        } else {
            ip.matches('.').count() >= 3
        };
    }

    if !ip.bytes().any(|b| b.is_ascii_digit()) {
        return false;
    }

    IPV4.is_match(ip)
        || HOSTNAME.is_match(ip)
        || IPV6.is_match(strip_cidr_suffix(ip))
        || IPV4_CIDR.is_match(ip)
}

fn looks_like_ipv6(ip: &str) -> bool {
    !ip.contains('.') && ip.contains(':')
}

/// Drops a trailing `/0`-`/128` prefix length from an address that
/// contains a colon
fn strip_cidr_suffix(ip: &str) -> &str {
    if !ip.contains(':') {
        return ip;
    }

    match ip.rsplit_once('/') {
        Some((addr, prefix)) if is_ipv6_prefix_length(prefix) => addr,
        _ => ip,
    }
}

fn is_ipv6_prefix_length(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && prefix.parse::<u8>().map_or(false, |len| len <= 128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("tommy.com" => true ; "two labels")]
    #[test_case("tommy" => false ; "no dot")]
    #[test_case("test.tommy.com" => true ; "subdomain")]
    #[test_case("test.tommy.co.uk" => true ; "country code")]
    #[test_case("my-host.example.org" => true ; "hyphen")]
    #[test_case("tommy.com " => false ; "trailing space")]
    #[test_case("tom my.com" => false ; "inner space")]
    #[test_case("tommy.com\n" => false ; "line feed")]
    #[test_case("user@tommy.com" => false ; "at sign")]
    #[test_case("[tommy].com" => false ; "brackets")]
    #[test_case("tommy.com:8080" => false ; "port")]
    #[test_case("*.tommy.com" => false ; "wildcard without wildcard mode")]
    #[test_case(".com" => false ; "empty first label")]
    fn test_validate_domain(domain: &str) -> bool {
        validate_domain(domain, false)
    }

    #[test_case("*.tommy.com" => true ; "asterisk")]
    #[test_case("mail?.tommy.com" => true ; "question mark")]
    #[test_case("#.tommy.com" => true ; "hash")]
    #[test_case("tommy.com" => true ; "plain")]
    #[test_case("*" => false ; "no dot")]
    #[test_case("*;.com" => false ; "forbidden punctuation")]
    fn test_validate_domain_wildcards(domain: &str) -> bool {
        validate_domain(domain, true)
    }

    #[test_case("tommy.com" => false ; "missing at")]
    #[test_case("@tommy.com" => false ; "missing local part")]
    #[test_case("t@tommy.com" => true ; "single character local part")]
    #[test_case("ted@tommy.co.uk" => true ; "country code domain")]
    #[test_case("\"ted\"@tommy.com" => true ; "quoted local part")]
    #[test_case("\"boss ted\"@tommy.com" => true ; "quoted local part with space")]
    #[test_case("boss @tommy.com" => false ; "unquoted space")]
    #[test_case("  ted@tommy.com  " => true ; "surrounding whitespace trimmed")]
    #[test_case("ted@[192.168.1.1]" => true ; "ip literal")]
    #[test_case("ted@[300.168.1.1]" => false ; "ip literal out of range")]
    #[test_case("ted..bob@tommy.com" => false ; "double dot")]
    #[test_case("ted@tommy.c" => false ; "short tld")]
    fn test_validate_email_address(email: &str) -> bool {
        validate_email_address(email, false)
    }

    #[test]
    fn test_wildcard_email_is_rejected() {
        // Wildcard addresses have never produced a positive verdict
        assert!(!validate_email_address("*@tommy.com", true));
        assert!(!validate_email_address("t?d@tommy.com", true));
        // Without a wildcard character the strict pattern still applies
        assert!(validate_email_address("ted@tommy.com", true));
        // Wildcard characters are ordinary atoms when wildcards are off
        assert!(validate_email_address("*@tommy.com", false));
    }

    #[test_case("::1" => true ; "loopback")]
    #[test_case("1.1.1.1" => true ; "ipv4")]
    #[test_case("1.1.1.1/16" => true ; "ipv4 cidr")]
    #[test_case("fe80::500b:59e9:351:fbf3" => true ; "link local")]
    #[test_case("fe80::500b:59e9:351:fbf3/29" => true ; "ipv6 cidr")]
    #[test_case("fe80::1%eth0" => true ; "zone index")]
    #[test_case("2001:0db8:85a3:0000:0000:8a2e:0370:7334" => true ; "full ipv6")]
    #[test_case("::ffff:192.168.1.1" => true ; "ipv4 mapped")]
    #[test_case("255.255.255.255" => true ; "broadcast")]
    #[test_case("256.1.1.1" => false ; "octet out of range")]
    #[test_case("1.1.1.1/33" => false ; "prefix out of range")]
    #[test_case("localhost" => false ; "no digit")]
    #[test_case("host1" => true ; "hostname with digit")]
    #[test_case("1::2::3" => false ; "double compression")]
    #[test_case("12345::" => false ; "group too long")]
    #[test_case("" => false ; "empty")]
    fn test_validate_ip_address(ip: &str) -> bool {
        validate_ip_address(ip, false)
    }

    #[test_case("192.168.*.*" => true ; "ipv4 wildcard")]
    #[test_case("192.168.#.1" => true ; "ipv4 hash")]
    #[test_case("192.?.1.1" => true ; "ipv4 question mark")]
    #[test_case("999.*.1.1" => true ; "octets not range checked")]
    #[test_case("192.168.*" => false ; "too few dots")]
    #[test_case("fe80:*:1:2" => true ; "ipv6 wildcard")]
    #[test_case("fe80::*" => false ; "too few colons")]
    #[test_case("10.0.0.1" => true ; "no wildcard falls through")]
    #[test_case("10.0.0" => false ; "no wildcard strict failure")]
    fn test_validate_ip_address_wildcards(ip: &str) -> bool {
        validate_ip_address(ip, true)
    }

    #[test]
    fn test_validate_ipv4() {
        assert!(validate_ipv4("10.0.0.1"));
        assert!(validate_ipv4("10.0.0.0/8"));
        assert!(!validate_ipv4("10.0.0"));
        assert!(!validate_ipv4("::1"));
        assert!(!validate_ipv4("host1"));
    }

    #[test]
    fn test_validate_ipv6() {
        assert!(validate_ipv6("::1"));
        assert!(validate_ipv6("fe80::500b:59e9:351:fbf3/64"));
        assert!(validate_ipv6("::"));
        assert!(!validate_ipv6("1.1.1.1"));
        assert!(!validate_ipv6("fe80::/abc"));
    }

    #[test]
    fn test_strip_cidr_suffix() {
        assert_eq!(strip_cidr_suffix("fe80::1/64"), "fe80::1");
        assert_eq!(strip_cidr_suffix("fe80::1/"), "fe80::1/");
        assert_eq!(strip_cidr_suffix("1.1.1.1/16"), "1.1.1.1/16");
        assert_eq!(strip_cidr_suffix("fe80::1/128"), "fe80::1");
        assert_eq!(strip_cidr_suffix("fe80::1/129"), "fe80::1/129");
        assert_eq!(strip_cidr_suffix("fe80::1/+64"), "fe80::1/+64");
    }

    #[test_case("fe80::1/0" => true ; "zero prefix")]
    #[test_case("fe80::1/128" => true ; "full prefix")]
    #[test_case("fe80::1/129" => false ; "prefix too long")]
    #[test_case("fe80::1/999" => false ; "prefix far out of range")]
    fn test_ipv6_prefix_length(ip: &str) -> bool {
        validate_ipv6(ip) && validate_ip_address(ip, false)
    }
}
