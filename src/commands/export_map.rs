// commands/export_map.rs
// Dump the active standardization table as JSON so it can be edited

use crate::standardize::StandardizationMap;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(map_path: Option<&Path>, output: Option<&Path>) -> Result<usize> {
    let map = StandardizationMap::load(map_path)?;
    let json = map.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("💾 Exported {} standardizations to {}", map.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(map.len())
}
