//! Field predicates.
//!
//! Length checks count characters of the trimmed value.

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive `local@domain.tld` shape, not RFC 5322.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\-+\s()]+$").expect("phone pattern compiles"));

/// Shortest accepted phone number, separators included.
pub const MIN_PHONE_LENGTH: usize = 10;

/// True iff the trimmed value is non-empty.
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value) && value.chars().count() >= MIN_PHONE_LENGTH
}

/// Empty values fail.
pub fn min_length(value: &str, min: usize) -> bool {
    let len = value.trim().chars().count();
    len > 0 && len >= min
}

/// Empty values pass; only non-empty values are length-checked.
pub fn max_length(value: &str, max: usize) -> bool {
    value.is_empty() || value.trim().chars().count() <= max
}
