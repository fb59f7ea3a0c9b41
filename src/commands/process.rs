// commands/process.rs
// Clean and standardize in a single pass

use super::standardize::{print_summary, write_change_log, StandardizeOptions};
use crate::genres::clean_genre_field;
use crate::progress::RowProgress;
use crate::standardize::{ChangeLog, StandardizationMap};
use crate::table;
use anyhow::Result;

/// Same options as the standardize pass, but the input is the raw listing
pub fn run(options: &StandardizeOptions) -> Result<ChangeLog> {
    println!("🧹🎸 Cleaning and standardizing genres");
    log::info!("Input file: {}", options.input.display());
    log::info!("Output file: {}", options.output.display());

    let map = StandardizationMap::load(options.map_path.as_deref())?;
    let mut changes = ChangeLog::new();
    let mut progress = RowProgress::new("process", options.progress_interval);

    let summary = table::rewrite_genre_column(
        &options.input,
        &options.output,
        &options.genre_column,
        &mut progress,
        |genre| {
            let cleaned = clean_genre_field(genre);
            let standardized = map.standardize_field(&cleaned);
            changes.record(&cleaned, &standardized);
            standardized
        },
    )?;
    progress.finish();
    changes.total_rows = summary.rows;

    write_change_log(&changes, &options.changes_log)?;
    print_summary(&changes);
    println!("💾 Standardized data saved to: {}", options.output.display());

    Ok(changes)
}
