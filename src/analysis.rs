//! Heuristics that spot truncated genre names across a whole listing
//!
//! Nothing here rewrites data. The output is a report that a human reads
//! before extending the standardization table.

use crate::genres::split_genre_field;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Qualifiers that usually precede "Metal"
pub const METAL_INDICATORS: &[&str] = &[
    "Black", "Death", "Doom", "Thrash", "Power", "Progressive", "Symphonic",
    "Technical", "Melodic", "Brutal", "Atmospheric", "Industrial", "Gothic",
    "Folk", "Viking", "Pagan", "Experimental", "Avant-garde", "Post",
];

/// Qualifiers that usually precede "Rock"
pub const ROCK_INDICATORS: &[&str] = &[
    "Progressive", "Psychedelic", "Alternative", "Indie", "Post", "Math",
];

/// Prefixes that form a "-core" genre
pub const CORE_INDICATORS: &[&str] = &[
    "Death", "Metal", "Math", "Post", "Grind", "Doom", "Black", "Sludge",
];

/// Qualifiers that usually precede "Punk"
pub const PUNK_INDICATORS: &[&str] = &["Crust", "Hardcore", "Post", "Pop"];

/// Bare adjectives that are never a complete genre on their own
pub const STANDALONE_DESCRIPTORS: &[&str] = &[
    "Technical", "Melodic", "Brutal", "Atmospheric", "Industrial",
    "Gothic", "Symphonic", "Epic", "Ambient", "Experimental",
];

/// Suggested completions for tokens flagged as incomplete metal genres
const METAL_SUGGESTIONS: &[(&str, &str)] = &[
    ("Atmospheric Black", "Atmospheric Black Metal"),
    ("Industrial Death", "Industrial Death Metal"),
    ("Progressive", "Progressive Metal"),
    ("Symphonic", "Symphonic Metal"),
    ("Technical", "Technical Death Metal"),
    ("Melodic Death", "Melodic Death Metal"),
    ("Brutal Death", "Brutal Death Metal"),
    ("Gothic", "Gothic Metal"),
    ("Folk", "Folk Metal"),
    ("Viking", "Viking Metal"),
    ("Pagan", "Pagan Metal"),
    ("Doom", "Doom Metal"),
    ("Black", "Black Metal"),
    ("Death", "Death Metal"),
    ("Thrash", "Thrash Metal"),
    ("Power", "Power Metal"),
    ("Industrial", "Industrial Metal"),
    ("Atmospheric", "Atmospheric Metal"),
    ("Experimental", "Experimental Metal"),
    ("Avant-garde", "Avant-garde Metal"),
    ("Post", "Post-Metal"),
    ("Epic", "Epic Metal"),
    ("Ambient", "Ambient Metal"),
];

/// Suggested completions for tokens flagged as incomplete rock genres
const ROCK_SUGGESTIONS: &[(&str, &str)] = &[
    ("Progressive Rock", "Progressive Rock"),
    ("Psychedelic", "Psychedelic Rock"),
    ("Alternative", "Alternative Rock"),
    ("Indie", "Indie Rock"),
    ("Post Rock", "Post-Rock"),
    ("Math", "Math Rock"),
];

fn matches_qualifier(token: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|indicator| {
        token == *indicator
            || token
                .strip_prefix(indicator)
                .map_or(false, |rest| rest.starts_with(' '))
    })
}

/// "Black", "Melodic Death" but not "Black Metal"
pub fn is_incomplete_metal(token: &str) -> bool {
    METAL_INDICATORS.contains(&token)
        || (matches_qualifier(token, METAL_INDICATORS) && !token.contains("Metal"))
}

/// "Psychedelic", "Indie Pop" but not "Indie Rock" or "Post Metal"
pub fn is_incomplete_rock(token: &str) -> bool {
    ROCK_INDICATORS.contains(&token)
        || (matches_qualifier(token, ROCK_INDICATORS)
            && !token.contains("Rock")
            && !token.contains("Metal"))
}

/// "Deathcore", "Grindcore" but not "Hardcore"
pub fn is_incomplete_core(token: &str) -> bool {
    if token.len() <= 4 {
        return false;
    }
    match token.strip_suffix("core") {
        Some(base) => CORE_INDICATORS.contains(&base.trim()),
        None => false,
    }
}

/// "Crust", "Pop Rock" but not "Crust Punk"
pub fn is_incomplete_punk(token: &str) -> bool {
    PUNK_INDICATORS.contains(&token)
        || (matches_qualifier(token, PUNK_INDICATORS) && !token.contains("Punk"))
}

/// "Epic", "Ambient"
pub fn is_incomplete_other(token: &str) -> bool {
    STANDALONE_DESCRIPTORS.contains(&token)
}

/// Flagged tokens per category plus raw occurrence counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreAnalysis {
    pub incomplete_metal: Vec<String>,
    pub incomplete_rock: Vec<String>,
    pub incomplete_core: Vec<String>,
    pub incomplete_punk: Vec<String>,
    pub incomplete_other: Vec<String>,
    pub counts: HashMap<String, usize>,
    pub total_tokens: usize,
}

impl GenreAnalysis {
    /// Raw occurrences of a token across the corpus
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// The `n` most frequent tokens, ties broken alphabetically
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Category title and its flagged tokens, in report order
    pub fn categories(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Incomplete Metal Genres", self.incomplete_metal.as_slice()),
            ("Incomplete Rock Genres", self.incomplete_rock.as_slice()),
            ("Incomplete Core Genres", self.incomplete_core.as_slice()),
            ("Incomplete Punk Genres", self.incomplete_punk.as_slice()),
            ("Other Incomplete Genres", self.incomplete_other.as_slice()),
        ]
    }
}

/// Extract every token from a set of raw genre fields, keeping duplicates
pub fn extract_tokens<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .flat_map(split_genre_field)
        .map(str::to_string)
        .collect()
}

/// Run every heuristic over a multiset of tokens
pub fn analyze_tokens(tokens: &[String]) -> GenreAnalysis {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }

    let unique: BTreeSet<&str> = counts.keys().map(String::as_str).collect();
    let flagged = |predicate: fn(&str) -> bool| -> Vec<String> {
        unique
            .iter()
            .filter(|token| predicate(token))
            .map(|token| token.to_string())
            .collect()
    };

    GenreAnalysis {
        incomplete_metal: flagged(is_incomplete_metal),
        incomplete_rock: flagged(is_incomplete_rock),
        incomplete_core: flagged(is_incomplete_core),
        incomplete_punk: flagged(is_incomplete_punk),
        incomplete_other: flagged(is_incomplete_other),
        total_tokens: tokens.len(),
        counts,
    }
}

fn lookup(table: &[(&str, &'static str)], token: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == token)
        .map(|(_, to)| *to)
}

/// Propose old -> new mappings for flagged tokens
///
/// Only metal, rock and standalone flags have suggestion tables.
pub fn suggest_standardizations(analysis: &GenreAnalysis) -> BTreeMap<String, String> {
    let mut suggestions = BTreeMap::new();

    for token in &analysis.incomplete_metal {
        if let Some(to) = lookup(METAL_SUGGESTIONS, token) {
            suggestions.insert(token.clone(), to.to_string());
        }
    }

    for token in &analysis.incomplete_rock {
        if let Some(to) = lookup(ROCK_SUGGESTIONS, token) {
            suggestions.insert(token.clone(), to.to_string());
        }
    }

    for token in &analysis.incomplete_other {
        let to = lookup(METAL_SUGGESTIONS, token).or_else(|| lookup(ROCK_SUGGESTIONS, token));
        if let Some(to) = to {
            suggestions.insert(token.clone(), to.to_string());
        }
    }

    suggestions
}

/// Render the suggestion file written next to the analyzed listing
pub fn render_suggestions(
    analysis: &GenreAnalysis,
    suggestions: &BTreeMap<String, String>,
) -> String {
    let mut out = String::from("Genre Standardizations Mapping\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");
    for (from, to) in suggestions {
        out.push_str(&format!(
            "'{}' → '{}' ({} occurrences)\n",
            from,
            to,
            analysis.count(from)
        ));
    }
    out
}
