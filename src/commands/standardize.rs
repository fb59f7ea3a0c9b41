// commands/standardize.rs
// Rewrite genre tokens through the standardization table

use crate::progress::RowProgress;
use crate::standardize::{ChangeLog, StandardizationMap};
use crate::table;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StandardizeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub genre_column: String,
    pub map_path: Option<PathBuf>,
    pub changes_log: PathBuf,
    pub progress_interval: usize,
}

pub fn run(options: &StandardizeOptions) -> Result<ChangeLog> {
    println!("🎸 Standardizing genres");
    log::info!("Input file: {}", options.input.display());
    log::info!("Output file: {}", options.output.display());

    let map = StandardizationMap::load(options.map_path.as_deref())?;
    let mut changes = ChangeLog::new();
    let mut progress = RowProgress::new("standardize", options.progress_interval);

    let summary = table::rewrite_genre_column(
        &options.input,
        &options.output,
        &options.genre_column,
        &mut progress,
        |genre| {
            let standardized = map.standardize_field(genre);
            changes.record(genre, &standardized);
            standardized
        },
    )?;
    progress.finish();

    // Rows of a listing without the column still count as processed
    changes.total_rows = summary.rows;

    write_change_log(&changes, &options.changes_log)?;
    print_summary(&changes);
    println!("💾 Standardized data saved to: {}", options.output.display());
    println!("   Change log saved to: {}", options.changes_log.display());

    Ok(changes)
}

pub fn write_change_log(changes: &ChangeLog, path: &Path) -> Result<()> {
    std::fs::write(path, changes.render())
        .with_context(|| format!("Failed to write change log {}", path.display()))
}

pub fn print_summary(changes: &ChangeLog) {
    println!("✅ Standardization complete");
    println!("   Total rows processed: {}", changes.total_rows);
    println!("   Rows with genre changes: {}", changes.rows_changed);
    println!("   Unique genre patterns changed: {}", changes.unique_patterns());

    if !changes.changes.is_empty() {
        log::info!("Genre standardizations applied:");
        for (original, change) in &changes.changes {
            log::info!(
                "  '{}' → '{}' ({} occurrences)",
                original,
                change.standardized,
                change.occurrences
            );
        }
    }
}
