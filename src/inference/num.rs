use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;

use crate::ir::TypeNode;

/// Fractional rendering: `-?digits.digits`.
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)$").expect("static regex"));

/// Lexical check on the number's decimal rendering: `1.0` is a decimal, `1` an
/// integer, whatever precision the number was parsed with.
pub fn classify_number(n: &Number) -> TypeNode {
    if DECIMAL.is_match(&n.to_string()) {
        TypeNode::Decimal
    } else {
        TypeNode::Integer
    }
}
