// commands/mod.rs
// One module per CLI subcommand

pub mod analyze;
pub mod categories;
pub mod clean;
pub mod config;
pub mod export_map;
pub mod process;
pub mod standardize;
