// commands/config.rs
// Configuration management commands

use crate::config::Config;
use anyhow::Result;
use std::path::Path;

/// Print the active configuration, optionally writing it to the config path
pub fn run(config: &Config, path: Option<&Path>, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if save {
        let saved_to = config.save(path)?;
        println!("💾 Config saved to {}", saved_to.display());
    }

    Ok(())
}
