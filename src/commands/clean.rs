// commands/clean.rs
// Split, strip and deduplicate the genre column

use crate::genres::clean_genre_field;
use crate::progress::RowProgress;
use crate::table::{self, PassSummary};
use anyhow::Result;
use std::path::PathBuf;

/// Rows whose before/after is echoed at debug level
const EXAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub genre_column: String,
    pub progress_interval: usize,
}

pub fn run(options: &CleanOptions) -> Result<PassSummary> {
    println!("🧹 Cleaning genres");
    log::info!("Reading from: {}", options.input.display());
    log::info!("Writing to: {}", options.output.display());

    let mut progress = RowProgress::new("clean", options.progress_interval);
    let mut examples = 0;
    let summary = table::rewrite_genre_column(
        &options.input,
        &options.output,
        &options.genre_column,
        &mut progress,
        |genre| {
            let cleaned = clean_genre_field(genre);
            if examples < EXAMPLE_ROWS {
                log::debug!("Example - Original: '{}' -> Cleaned: '{}'", genre, cleaned);
                examples += 1;
            }
            cleaned
        },
    )?;
    progress.finish();

    println!("✅ Successfully processed {} rows", summary.rows);
    println!("   Cleaned CSV written to: {}", options.output.display());
    Ok(summary)
}
