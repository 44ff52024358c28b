//! Boolean classifier.

use std::collections::HashSet;

use crate::types::Column;

/// Tokens a boolean column may be drawn from, compared after lowercasing.
pub const BOOLEAN_TOKENS: [&str; 4] = ["true", "false", "yes", "no"];

/// Returns `true` if `s` is one of [`BOOLEAN_TOKENS`], ignoring case and surrounding space.
pub fn is_boolean_token(s: &str) -> bool {
    parse_boolean_token(s).is_some()
}

/// `true`/`yes` → `true`, `false`/`no` → `false`, ignoring case.
pub fn parse_boolean_token(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// A column is boolean when it holds exactly two distinct non-null values once lowercased,
/// and both are [`BOOLEAN_TOKENS`]. `Yes`, `YES` and `yes` count as one value.
pub(crate) fn classify(column: &Column) -> bool {
    let distinct: HashSet<String> = column
        .non_null()
        .map(|v| v.to_string().trim().to_lowercase())
        .collect();
    distinct.len() == 2 && distinct.iter().all(|v| BOOLEAN_TOKENS.contains(&v.as_str()))
}
