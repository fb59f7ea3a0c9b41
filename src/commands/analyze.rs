// commands/analyze.rs
// Report genre tokens that look truncated

use crate::analysis::{self, GenreAnalysis};
use crate::table;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub genre_column: String,
    pub report: PathBuf,
    pub top_genres: usize,
}

pub fn run(options: &AnalyzeOptions) -> Result<GenreAnalysis> {
    println!("🔍 Analyzing genres in {}", options.input.display());

    let fields = table::collect_genre_fields(&options.input, &options.genre_column)?;
    let tokens = analysis::extract_tokens(fields.iter().map(String::as_str));
    println!("   Total genre entries found: {}", tokens.len());

    let analysis = analysis::analyze_tokens(&tokens);

    println!("\nTop {} most common genres:", options.top_genres);
    for (genre, count) in analysis.most_common(options.top_genres) {
        println!("  {}: {}", genre, count);
    }

    for (title, genres) in analysis.categories() {
        println!("\n{}:", title);
        for genre in genres {
            println!("  {}: {} occurrences", genre, analysis.count(genre));
        }
    }

    let suggestions = analysis::suggest_standardizations(&analysis);
    println!("\nSuggested standardizations:");
    for (from, to) in &suggestions {
        println!("  '{}' → '{}' ({} occurrences)", from, to, analysis.count(from));
    }

    std::fs::write(&options.report, analysis::render_suggestions(&analysis, &suggestions))
        .with_context(|| format!("Failed to write report {}", options.report.display()))?;

    println!("\n💾 Standardizations saved to: {}", options.report.display());
    println!("   Total standardizations suggested: {}", suggestions.len());

    Ok(analysis)
}
