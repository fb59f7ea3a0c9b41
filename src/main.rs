mod analysis;
mod categories;
mod commands;
mod config;
mod genres;
mod progress;
mod standardize;
mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::analyze::AnalyzeOptions;
use commands::clean::CleanOptions;
use commands::standardize::StandardizeOptions;
use config::Config;

/// Genre column cleanup for band listing CSV files
#[derive(Debug, Parser)]
#[command(name = "gig-genres")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to $GIG_GENRES_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Name of the genre column
    #[arg(long, global = true)]
    column: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split, strip parentheticals, dedupe and sort every genre field
    Clean {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report genre tokens that look truncated and suggest completions
    Analyze {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write the suggested mappings
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Rewrite genre tokens through the standardization table
    Standardize {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON standardization table replacing the built-in one
        #[arg(long)]
        map: Option<PathBuf>,
        /// Where to write the change log
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Clean then standardize in one pass
    Process {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        map: Option<PathBuf>,
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// List a listing's genres grouped by category
    Categories {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// List each genre only under its first matching category
        #[arg(long)]
        primary: bool,
    },

    /// Write the active standardization table as JSON
    ExportMap {
        #[arg(long)]
        map: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the active configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(column) = cli.column {
        config.genre_column = column;
    }

    match cli.command {
        Commands::Clean { input, output } => {
            commands::clean::run(&CleanOptions {
                input: input.unwrap_or_else(|| config.input_path.clone()),
                output: output.unwrap_or_else(|| config.cleaned_path.clone()),
                genre_column: config.genre_column.clone(),
                progress_interval: config.progress_interval,
            })
            .context("clean failed")?;
        }
        Commands::Analyze { input, report } => {
            commands::analyze::run(&AnalyzeOptions {
                input: input.unwrap_or_else(|| config.cleaned_path.clone()),
                genre_column: config.genre_column.clone(),
                report: report.unwrap_or_else(|| config.report_path.clone()),
                top_genres: config.top_genres,
            })
            .context("analysis failed")?;
        }
        Commands::Standardize { input, output, map, log } => {
            commands::standardize::run(&StandardizeOptions {
                input: input.unwrap_or_else(|| config.cleaned_path.clone()),
                output: output.unwrap_or_else(|| config.standardized_path.clone()),
                genre_column: config.genre_column.clone(),
                map_path: map.or_else(|| config.map_path.clone()),
                changes_log: log.unwrap_or_else(|| config.changes_log_path.clone()),
                progress_interval: config.progress_interval,
            })
            .context("standardization failed")?;
        }
        Commands::Process { input, output, map, log } => {
            commands::process::run(&StandardizeOptions {
                input: input.unwrap_or_else(|| config.input_path.clone()),
                output: output.unwrap_or_else(|| config.standardized_path.clone()),
                genre_column: config.genre_column.clone(),
                map_path: map.or_else(|| config.map_path.clone()),
                changes_log: log.unwrap_or_else(|| config.changes_log_path.clone()),
                progress_interval: config.progress_interval,
            })
            .context("processing failed")?;
        }
        Commands::Categories { input, primary } => {
            let input = input.unwrap_or_else(|| config.standardized_path.clone());
            commands::categories::run(&input, &config.genre_column, primary)
                .context("categorizing failed")?;
        }
        Commands::ExportMap { map, output } => {
            let map = map.or_else(|| config.map_path.clone());
            commands::export_map::run(map.as_deref(), output.as_deref()).context("export failed")?;
        }
        Commands::Config { save } => {
            commands::config::run(&config, cli.config.as_deref(), save)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_standardize() {
        let cli = Cli::parse_from([
            "gig-genres",
            "standardize",
            "-i",
            "in.csv",
            "-o",
            "out.csv",
            "--map",
            "map.json",
            "--column",
            "style",
        ]);
        assert_eq!(cli.column.as_deref(), Some("style"));
        match cli.command {
            Commands::Standardize { input, output, map, log } => {
                assert_eq!(input, Some(PathBuf::from("in.csv")));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(map, Some(PathBuf::from("map.json")));
                assert_eq!(log, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_categories_primary() {
        let cli = Cli::parse_from(["gig-genres", "categories", "--primary"]);
        match cli.command {
            Commands::Categories { input, primary } => {
                assert_eq!(input, None);
                assert!(primary);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
