//! Rewriting genre tokens to their canonical names
//!
//! The standardization table maps an abbreviated or truncated token
//! ("Black") to the full genre name ("Black Metal"). Tokens that are not in
//! the table pass through untouched. Identity entries record tokens that were
//! reviewed and are already complete.

use crate::genres::{split_genre_field, JOIN_SEPARATOR};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::Path;

/// Curated standardizations shipped with the tool
const BUILTIN_STANDARDIZATIONS: &[(&str, &str)] = &[
    // Standalone metal genres that need the "Metal" suffix
    ("Black", "Black Metal"),
    ("Death", "Death Metal"),
    ("Doom", "Doom Metal"),
    ("Thrash", "Thrash Metal"),
    ("Power", "Power Metal"),
    ("Heavy", "Heavy Metal"),
    ("Folk", "Folk Metal"),
    ("Gothic", "Gothic Metal"),
    ("Industrial", "Industrial Metal"),
    ("Pagan", "Pagan Metal"),
    ("Viking", "Viking Metal"),
    ("Stoner", "Stoner Metal"),
    ("Sludge", "Sludge Metal"),

    // Descriptive terms that typically refer to metal
    ("Progressive", "Progressive Metal"),
    ("Symphonic", "Symphonic Metal"),
    ("Technical", "Technical Death Metal"),
    ("Melodic", "Melodic Metal"),
    ("Atmospheric", "Atmospheric Metal"),
    ("Experimental", "Experimental Metal"),
    ("Avant-garde", "Avant-garde Metal"),
    ("Epic", "Epic Metal"),
    ("Brutal", "Brutal Death Metal"),

    // Compound incomplete genres
    ("Atmospheric Black", "Atmospheric Black Metal"),
    ("Industrial Death", "Industrial Death Metal"),
    ("Melodic Death", "Melodic Death Metal"),
    ("Technical Death", "Technical Death Metal"),
    ("Symphonic Black", "Symphonic Black Metal"),
    ("Progressive Death", "Progressive Death Metal"),
    ("Progressive Black", "Progressive Black Metal"),
    ("Melodic Black", "Melodic Black Metal"),
    ("Industrial Black", "Industrial Black Metal"),
    ("Experimental Black", "Experimental Black Metal"),
    ("Avant-garde Black", "Avant-garde Black Metal"),
    ("Progressive Doom", "Progressive Doom Metal"),
    ("Melodic Doom", "Melodic Doom Metal"),
    ("Atmospheric Doom", "Atmospheric Doom Metal"),
    ("Psychedelic Doom", "Psychedelic Doom Metal"),
    ("Progressive Heavy", "Progressive Heavy Metal"),
    ("Melodic Heavy", "Melodic Heavy Metal"),
    ("Progressive Thrash", "Progressive Thrash Metal"),
    ("Melodic Thrash", "Melodic Thrash Metal"),
    ("Technical Thrash", "Technical Thrash Metal"),
    ("Progressive Power", "Progressive Power Metal"),
    ("Symphonic Power", "Symphonic Power Metal"),
    ("Symphonic Death", "Symphonic Death Metal"),
    ("Progressive Sludge", "Progressive Sludge Metal"),
    ("Atmospheric Sludge", "Atmospheric Sludge Metal"),
    ("Experimental Sludge", "Experimental Sludge Metal"),
    ("Psychedelic Sludge", "Psychedelic Sludge Metal"),
    ("Progressive Stoner", "Progressive Stoner Metal"),
    ("Experimental Stoner", "Experimental Stoner Metal"),
    ("Psychedelic Stoner", "Psychedelic Stoner Metal"),
    ("Progressive Groove", "Progressive Groove Metal"),
    ("Industrial Groove", "Industrial Groove Metal"),
    ("Melodic Groove", "Melodic Groove Metal"),
    ("Symphonic Folk", "Symphonic Folk Metal"),
    ("Atmospheric Folk", "Atmospheric Folk Metal"),

    // Rock
    ("Psychedelic", "Psychedelic Rock"),
    ("Alternative", "Alternative Rock"),
    ("Indie", "Indie Rock"),
    ("Math", "Math Rock"),
    ("Progressive Rock", "Progressive Rock"),
    ("Alternative Rock", "Alternative Rock"),
    ("Hard Rock", "Hard Rock"),
    ("Post Rock", "Post-Rock"),
    ("Atmospheric Rock", "Atmospheric Rock"),
    ("Industrial Rock", "Industrial Rock"),
    ("Progressive Post-Rock", "Progressive Post-Rock"),
    ("Atmospheric Alternative Rock", "Atmospheric Alternative Rock"),
    ("Experimental Psychedelic Doom", "Experimental Psychedelic Doom Metal"),

    // Electronic and ambient. "Ambient" stays as-is, context decides.
    ("Ambient", "Ambient"),
    ("Noise", "Noise"),
    ("Drone", "Drone"),
    ("Dark Ambient", "Dark Ambient"),
    ("Power Electronics", "Power Electronics"),
    ("Experimental Industrial", "Experimental Industrial"),
    ("Atmospheric Industrial", "Atmospheric Industrial"),
    ("Progressive Ambient", "Progressive Ambient"),
    ("Psychedelic Drone", "Psychedelic Drone"),

    // Core genres are complete as they are
    ("Deathcore", "Deathcore"),
    ("Metalcore", "Metalcore"),
    ("Grindcore", "Grindcore"),
    ("Hardcore", "Hardcore"),
    ("Mathcore", "Mathcore"),
    ("Blackcore", "Blackcore"),
    ("Doomcore", "Doomcore"),
    ("Melodic Deathcore", "Melodic Deathcore"),
    ("Technical Deathcore", "Technical Deathcore"),
    ("Progressive Deathcore", "Progressive Deathcore"),
    ("Symphonic Deathcore", "Symphonic Deathcore"),
    ("Brutal Deathcore", "Brutal Deathcore"),

    // Punk
    ("Punk", "Punk"),
    ("Crust", "Crust Punk"),
    ("D-Beat", "D-Beat"),
    ("Grind", "Grindcore"),

    // Special variants
    ("Nu-Metal", "Nu-Metal"),
    ("Slam", "Slam"),
    ("Blackened Death Metal", "Blackened Death Metal"),
    ("Blackened Thrash Metal", "Blackened Thrash Metal"),
    ("Blackened Deathcore", "Blackened Deathcore"),
    ("Black 'n' Roll", "Black 'n' Roll"),
    ("Death 'n' Roll", "Death 'n' Roll"),
    ("Thrash 'n' Roll", "Thrash 'n' Roll"),

    // Post- genres keep consistent hyphenation
    ("Post-Metal", "Post-Metal"),
    ("Post-Rock", "Post-Rock"),
    ("Post-Punk", "Post-Punk"),
    ("Post-Hardcore", "Post-Hardcore"),
    ("Post-Black Metal", "Post-Black Metal"),
    ("Avant-garde Post-Black", "Avant-garde Post-Black Metal"),
];

/// Exact-match token -> canonical token table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardizationMap {
    entries: IndexMap<String, String>,
}

impl Default for StandardizationMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StandardizationMap {
    /// The table compiled into the binary
    pub fn builtin() -> Self {
        BUILTIN_STANDARDIZATIONS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    /// Parse a JSON object of `"token": "canonical"` pairs
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: IndexMap<String, String> = serde_json::from_str(json)
            .context("Standardization map must be a JSON object of strings")?;
        Ok(Self { entries })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read standardization map {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid standardization map {}", path.display()))
    }

    /// Load a map file when one is configured, otherwise the built-in table
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let map = Self::from_file(path)?;
                if map.is_empty() {
                    log::warn!("{} has no entries, every genre passes through", path.display());
                }
                log::info!("Loaded {} standardizations from {}", map.len(), path.display());
                Ok(map)
            }
            None => {
                let map = Self::builtin();
                log::debug!("Using {} built-in standardizations", map.len());
                Ok(map)
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Standardize one token, returning it unchanged when unmapped
    pub fn standardize_token<'a>(&'a self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    /// Standardize a whole genre field
    ///
    /// The field is re-split on `/`, `,` and `;` so uncleaned input works too.
    /// Order is preserved and nothing is re-sorted or deduplicated.
    ///
    /// # Examples
    /// ```ignore
    /// use crate::standardize::StandardizationMap;
    ///
    /// let map = StandardizationMap::builtin();
    /// assert_eq!(
    ///     map.standardize_field("Black/Progressive"),
    ///     "Black Metal/Progressive Metal"
    /// );
    /// assert_eq!(map.standardize_field("Djent"), "Djent");
    /// ```
    pub fn standardize_field(&self, field: &str) -> String {
        if field.trim().is_empty() {
            return field.to_string();
        }

        split_genre_field(field)
            .into_iter()
            .map(|token| self.standardize_token(token))
            .collect::<Vec<_>>()
            .join(JOIN_SEPARATOR)
    }
}

impl FromIterator<(String, String)> for StandardizationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// How one distinct original field value was rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub standardized: String,
    pub occurrences: usize,
}

/// Accumulates which genre fields changed during a standardization pass
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    pub total_rows: usize,
    pub rows_changed: usize,
    pub changes: BTreeMap<String, FieldChange>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one row; blank originals count as processed but never as changed
    pub fn record(&mut self, original: &str, standardized: &str) {
        self.total_rows += 1;

        let original = original.trim();
        if original.is_empty() || original == standardized {
            return;
        }

        self.rows_changed += 1;
        self.changes
            .entry(original.to_string())
            .and_modify(|change| change.occurrences += 1)
            .or_insert_with(|| FieldChange {
                standardized: standardized.to_string(),
                occurrences: 1,
            });
    }

    /// Number of distinct original values that changed
    pub fn unique_patterns(&self) -> usize {
        self.changes.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Genre Standardization Changes Log\n");
        out.push_str(&"=".repeat(40));
        out.push_str("\n\n");
        out.push_str(&format!("Total rows processed: {}\n", self.total_rows));
        out.push_str(&format!("Rows with genre changes: {}\n", self.rows_changed));
        out.push_str(&format!("Unique genre patterns changed: {}\n\n", self.unique_patterns()));
        for (original, change) in &self.changes {
            out.push_str(&format!(
                "'{}' → '{}' ({} occurrences)\n",
                original, change.standardized, change.occurrences
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standardize_field() {
        let map = StandardizationMap::builtin();
        assert_eq!(map.standardize_field("Black/Progressive"), "Black Metal/Progressive Metal");
        assert_eq!(map.standardize_field("Djent"), "Djent");
        assert_eq!(map.standardize_field(""), "");
        assert_eq!(
            map.standardize_field("Post Rock; Crust , Hardcore"),
            "Post-Rock/Crust Punk/Hardcore"
        );
    }

    #[test]
    fn test_standardize_preserves_order() {
        let map = StandardizationMap::builtin();
        assert_eq!(map.standardize_field("Thrash/Black/Djent"), "Thrash Metal/Black Metal/Djent");
    }

    #[test]
    fn test_standardize_is_exact_match() {
        let map = StandardizationMap::builtin();
        assert_eq!(map.standardize_field("black"), "black");
        assert_eq!(map.standardize_field("Black "), "Black Metal");
    }

    #[test]
    fn test_builtin_identity_entries() {
        let map = StandardizationMap::builtin();
        assert_eq!(map.get("Hardcore"), Some("Hardcore"));
        assert_eq!(map.get("Ambient"), Some("Ambient"));
        assert_eq!(map.get("Djent"), None);
        assert!(!map.is_empty());
    }

    #[test]
    fn test_from_json_keeps_order() {
        let json = r#"{"Djent": "Progressive Metal", "Black": "Black Metal"}"#;
        let map = StandardizationMap::from_json(json).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.standardize_field("Djent/Doom"), "Progressive Metal/Doom");

        let json = map.to_json_pretty().unwrap();
        assert!(json.find("Djent").unwrap() < json.find("\"Black\"").unwrap());
        assert_eq!(StandardizationMap::from_json(&json).unwrap(), map);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(StandardizationMap::from_json("[1, 2]").is_err());
        assert!(StandardizationMap::from_json(r#"{"Black": 3}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, r#"{"Grind": "Grindcore"}"#).unwrap();

        let map = StandardizationMap::load(Some(path.as_path())).unwrap();
        assert_eq!(map.get("Grind"), Some("Grindcore"));
        assert!(StandardizationMap::load(Some(dir.path().join("missing.json").as_path())).is_err());
        assert_eq!(StandardizationMap::load(None).unwrap(), StandardizationMap::builtin());
    }

    #[test]
    fn test_empty_map_file_passes_everything_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, "{}").unwrap();

        let map = StandardizationMap::load(Some(path.as_path())).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.standardize_field("Black/Doom"), "Black/Doom");
    }

    #[test]
    fn test_change_log() {
        let map = StandardizationMap::builtin();
        let mut log = ChangeLog::new();
        for original in ["Black/Doom", "Djent", "", "Black/Doom", "Death Metal"] {
            let standardized = map.standardize_field(original);
            log.record(original, &standardized);
        }

        assert_eq!(log.total_rows, 5);
        assert_eq!(log.rows_changed, 2);
        assert_eq!(log.unique_patterns(), 1);
        assert_eq!(
            log.changes.get("Black/Doom"),
            Some(&FieldChange {
                standardized: "Black Metal/Doom Metal".to_string(),
                occurrences: 2,
            })
        );

        let rendered = log.render();
        assert!(rendered.contains("Total rows processed: 5\n"));
        assert!(rendered.contains("Rows with genre changes: 2\n"));
        assert!(rendered.contains("'Black/Doom' → 'Black Metal/Doom Metal' (2 occurrences)\n"));
    }

    #[test]
    fn test_change_log_compares_trimmed_original() {
        let mut log = ChangeLog::new();
        log.record("  Djent  ", "Djent");
        assert_eq!(log.rows_changed, 0);
    }

    proptest! {
        #[test]
        fn prop_unknown_tokens_survive(tokens in proptest::collection::vec("[a-z]{1,8}", 0..6)) {
            let map = StandardizationMap::builtin();
            let field = tokens.join("/");
            let out = map.standardize_field(&field);
            if !field.is_empty() {
                prop_assert_eq!(out, field);
            }
        }

        #[test]
        fn prop_mixed_fields_keep_positions(
            picks in proptest::collection::vec(
                (any::<bool>(), 0..BUILTIN_STANDARDIZATIONS.len(), "[a-z]{1,8}"),
                1..8,
            )
        ) {
            let map = StandardizationMap::builtin();
            let tokens: Vec<&str> = picks
                .iter()
                .map(|(known, index, unknown)| {
                    if *known { BUILTIN_STANDARDIZATIONS[*index].0 } else { unknown.as_str() }
                })
                .collect();

            let out = map.standardize_field(&tokens.join("/"));
            let out_tokens: Vec<&str> = out.split('/').collect();

            prop_assert_eq!(out_tokens.len(), tokens.len());
            for (position, (known, index, unknown)) in picks.iter().enumerate() {
                if *known {
                    prop_assert_eq!(out_tokens[position], BUILTIN_STANDARDIZATIONS[*index].1);
                } else {
                    prop_assert_eq!(out_tokens[position], unknown.as_str());
                }
            }
        }
    }
}
