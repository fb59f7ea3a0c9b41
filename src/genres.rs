//! Splitting and deduplication of raw genre fields
//!
//! Band listings carry the genre column as a free-form string such as
//! `"Black/Death (early), Doom; Black"`. This module breaks that string into
//! atomic genre tokens and rebuilds a canonical field from them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Characters that separate genres inside a single field
pub const GENRE_SEPARATORS: &[char] = &['/', ',', ';'];

/// Separator used when joining tokens back into a field
pub const JOIN_SEPARATOR: &str = "/";

/// Parenthetical notes like "(early)", "(later)", "(mid)"
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// Split a field on every separator, trimming and dropping empty parts
///
/// Parenthetical notes are left in place and the original order is kept.
///
/// # Examples
/// ```ignore
/// use crate::genres::split_genre_field;
///
/// assert_eq!(split_genre_field(" Black / Doom;;Thrash "), vec!["Black", "Doom", "Thrash"]);
/// ```
pub fn split_genre_field(field: &str) -> Vec<&str> {
    field
        .split(GENRE_SEPARATORS)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Remove every parenthetical note from a single candidate and trim it
///
/// An opening parenthesis without a closing one is kept as-is.
pub fn strip_parentheticals(candidate: &str) -> String {
    PARENTHETICAL.replace_all(candidate, "").trim().to_string()
}

/// The set of unique cleaned tokens found in a raw field
pub fn genre_tokens(field: &str) -> BTreeSet<String> {
    field
        .split(GENRE_SEPARATORS)
        .map(strip_parentheticals)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Clean a raw genre field
///
/// 1. Split on `/`, `,` and `;`
/// 2. Remove parenthetical notes and trim
/// 3. Drop empties and duplicates (case-sensitive)
/// 4. Sort and join with `/`
///
/// # Examples
/// ```ignore
/// use crate::genres::clean_genre_field;
///
/// assert_eq!(clean_genre_field("Black, Death Metal, Black"), "Black/Death Metal");
/// assert_eq!(clean_genre_field("Doom (early)/Doom (later)"), "Doom");
/// ```
pub fn clean_genre_field(field: &str) -> String {
    if field.trim().is_empty() {
        return String::new();
    }

    genre_tokens(field)
        .into_iter()
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}
