// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV_VAR: &str = "GIG_GENRES_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column holding the genre field
    pub genre_column: String,
    /// Raw band listing
    pub input_path: PathBuf,
    /// Output of the clean pass, input of the standardize pass
    pub cleaned_path: PathBuf,
    /// Output of the standardize and process passes
    pub standardized_path: PathBuf,
    /// JSON standardization table replacing the built-in one
    pub map_path: Option<PathBuf>,
    pub changes_log_path: PathBuf,
    pub report_path: PathBuf,
    /// Rows between progress messages
    pub progress_interval: usize,
    /// How many of the most common genres the analysis prints
    pub top_genres: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genre_column: "genre".to_string(),
            input_path: PathBuf::from("uk_active_bands.csv"),
            cleaned_path: PathBuf::from("uk_active_bands_cleaned.csv"),
            standardized_path: PathBuf::from("uk_active_bands_standardized.csv"),
            map_path: None,
            changes_log_path: PathBuf::from("genre_changes_log.txt"),
            report_path: PathBuf::from("genre_standardizations.txt"),
            progress_interval: 500,
            top_genres: 20,
        }
    }
}

impl Config {
    /// Load the config from `path`, the environment override, or the default
    /// location. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path)?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&contents)
                .with_context(|| format!("Invalid config {}", config_path.display()))?;
            log::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            log::debug!("No config at {}, using defaults", config_path.display());
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = Self::resolve_path(path)?;

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config {}", config_path.display()))?;

        Ok(config_path)
    }

    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = path {
            return Ok(path.to_path_buf());
        }
        if let Some(from_env) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(from_env));
        }
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join("gig-genres").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("config.json").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.genre_column, "genre");
        assert_eq!(config.progress_interval, 500);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            genre_column: "styles".to_string(),
            map_path: Some(PathBuf::from("map.json")),
            ..Config::default()
        };
        assert_eq!(config.save(Some(path.as_path())).unwrap(), path);
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"top_genres": 5}"#).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.top_genres, 5);
        assert_eq!(config.genre_column, "genre");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    #[serial]
    fn test_env_var_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env-config.json");
        std::fs::write(&path, r#"{"genre_column": "Genre"}"#).unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &path);
        let resolved = Config::resolve_path(None);
        let config = Config::load(None);
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(resolved.unwrap(), path);
        assert_eq!(config.unwrap().genre_column, "Genre");
    }

    #[test]
    #[serial]
    fn test_explicit_path_beats_env_var() {
        std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/config.json");
        let resolved = Config::resolve_path(Some(Path::new("local.json")));
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(resolved.unwrap(), PathBuf::from("local.json"));
    }
}
