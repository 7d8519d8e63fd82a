use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::ir::TypeNode;

/// ISO-8601 shapes accepted without an offset.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

pub fn classify_string(s: &str) -> TypeNode {
    if looks_like_date(s) {
        TypeNode::Date
    } else {
        TypeNode::String
    }
}

/// True when `s` parses as a valid calendar date or date-time.
pub fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    // cheap reject before trying every format
    if s.len() < 10 || !s.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
        return false;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() {
        return true;
    }
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        return true;
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}
