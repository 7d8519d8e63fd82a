//! Name normalization shared by the analyzer, the resolver and every emitter.
//!
//! The same rules must hold at the definition site and at every reference site,
//! otherwise a reference would point at a type name nobody declared.
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-]+").expect("static regex"));

/// Normalize a JSON key to lower camel case.
///
/// - `snake_case` / `kebab-case` / `SCREAMING_SNAKE` → `lowerCamel`
/// - `ALLCAPS` → `allcaps`
/// - anything else (already camel, mixed) is kept as is
pub fn to_camel(key: &str) -> String {
    if SEPARATORS.is_match(key) {
        let mut parts = SEPARATORS
            .split(key)
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase);
        let Some(head) = parts.next() else {
            // key made only of separators
            return key.to_string();
        };
        return parts.fold(head, |mut acc, part| {
            acc.push_str(&capitalize(&part));
            acc
        });
    }
    if is_all_caps(key) {
        return key.to_lowercase();
    }
    key.to_string()
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plural field name → singular element name (`items` → `item`, `categories` → `category`).
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if name.ends_with("ss") {
        return name.to_string();
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Declared type name for a field / element name.
pub fn type_name(name: &str) -> String {
    capitalize(name)
}

fn is_all_caps(s: &str) -> bool {
    s.chars().any(|c| c.is_alphabetic())
        && !s.chars().any(|c| c.is_lowercase())
        && s.len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_from_separated_and_caps() {
        assert_eq!(to_camel("first_name"), "firstName");
        assert_eq!(to_camel("first-name"), "firstName");
        assert_eq!(to_camel("FIRST_NAME"), "firstName");
        assert_eq!(to_camel("_id"), "id");
        assert_eq!(to_camel("ID"), "id");
        assert_eq!(to_camel("firstName"), "firstName");
        assert_eq!(to_camel("X"), "X");
        assert_eq!(to_camel("__"), "__");
    }

    #[test]
    fn singular_forms() {
        assert_eq!(singularize("items"), "item");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("data"), "data");
        assert_eq!(singularize("s"), "s");
    }

    #[test]
    fn type_names_are_capitalized() {
        assert_eq!(type_name("owner"), "Owner");
        assert_eq!(type_name(&singularize("friends")), "Friend");
        assert_eq!(type_name(""), "");
    }
}
