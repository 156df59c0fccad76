use crate::domain::model::RejectReason;
use regex::Regex;
use std::sync::LazyLock;

static ENCODED_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)%3A|%253A").expect("encoded colon pattern is valid"));

// A colon after a dot and at least one more character is a host:port-like
// separator, not a scheme.
static COLON_AFTER_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\..+:").expect("colon-after-dot pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    Eligible,
    Rejected(RejectReason),
}

pub fn is_empty_entry(first_field: &str) -> bool {
    first_field.is_empty()
}

pub fn has_encoded_colon(first_field: &str) -> bool {
    ENCODED_COLON.is_match(first_field)
}

pub fn has_malformed_scheme(first_field: &str) -> bool {
    first_field.contains(':') && COLON_AFTER_DOT.is_match(first_field)
}

/// Runs the exclusion rules in order and reports the first one that fires.
pub fn check(first_field: &str) -> FilterVerdict {
    if is_empty_entry(first_field) {
        FilterVerdict::Rejected(RejectReason::Empty)
    } else if has_encoded_colon(first_field) {
        FilterVerdict::Rejected(RejectReason::EncodedColon)
    } else if has_malformed_scheme(first_field) {
        FilterVerdict::Rejected(RejectReason::MalformedScheme)
    } else {
        FilterVerdict::Eligible
    }
}

pub fn is_eligible(first_field: &str) -> bool {
    check(first_field) == FilterVerdict::Eligible
}
