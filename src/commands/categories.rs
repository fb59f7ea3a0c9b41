// commands/categories.rs
// Group a listing's genres into browsing categories

use crate::categories::{categorize_genre, category_names, genres_for_category};
use crate::genres::genre_tokens;
use crate::table;
use anyhow::Result;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::Path;

/// Category name -> sorted genres, in display order; empty categories omitted
pub fn group_genres(fields: &[String]) -> IndexMap<&'static str, Vec<String>> {
    let unique: BTreeSet<String> = fields.iter().flat_map(|field| genre_tokens(field)).collect();
    let all: Vec<String> = unique.into_iter().collect();

    category_names()
        .into_iter()
        .map(|name| (name, genres_for_category(&all, name)))
        .filter(|(_, genres)| !genres.is_empty())
        .collect()
}

/// Like [`group_genres`], but each genre appears only under its first
/// matching category
pub fn group_by_primary(fields: &[String]) -> IndexMap<&'static str, Vec<String>> {
    let unique: BTreeSet<String> = fields.iter().flat_map(|field| genre_tokens(field)).collect();

    let mut grouped: IndexMap<&'static str, Vec<String>> = category_names()
        .into_iter()
        .map(|name| (name, Vec::new()))
        .collect();
    for genre in unique {
        let category = categorize_genre(&genre);
        log::debug!("{} -> {}", genre, category);
        grouped.entry(category).or_default().push(genre);
    }
    grouped.retain(|_, genres| !genres.is_empty());
    grouped
}

pub fn run(
    input: &Path,
    genre_column: &str,
    primary: bool,
) -> Result<IndexMap<&'static str, Vec<String>>> {
    let fields = table::collect_genre_fields(input, genre_column)?;
    let grouped = if primary {
        group_by_primary(&fields)
    } else {
        group_genres(&fields)
    };

    for (name, genres) in &grouped {
        println!("{} ({})", name, genres.len());
        for genre in genres {
            println!("  {}", genre);
        }
    }

    Ok(grouped)
}
