//! Identifier and value normalization for generated INSERT statements.

use once_cell::sync::Lazy;
use regex::Regex;

/// Quote a column header so it is a valid SQL identifier.
///
/// Plain alphanumeric names pass through untouched; anything else (spaces,
/// punctuation, empty string) is wrapped in square brackets.
pub fn normalize_field_name(name: &str) -> String {
    static RE_PLAIN_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9]+$").unwrap());

    if RE_PLAIN_IDENT.is_match(name) {
        name.to_string()
    } else {
        format!("[{}]", name)
    }
}

/// Render a raw cell as a SQL literal.
///
/// The literal text `NULL` passes through unquoted. Every other value has
/// stray occurrences of the string delimiter removed, single quotes doubled,
/// and is wrapped in single quotes.
pub fn normalize_value(raw: &str, string_sep: char) -> String {
    if raw == "NULL" {
        return raw.to_string();
    }

    let stripped: String = raw.chars().filter(|&c| c != string_sep).collect();

    format!("'{}'", stripped.replace('\'', "''"))
}
