use std::{collections::HashMap, path::PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use deck::DeckConfig;

pub mod deck;
pub mod stats;
pub mod theme;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    pub theme: theme::Theme,
    pub statistics: stats::StatisticsConfig,
    pub decks_dir: Option<PathBuf>,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to parse decks: {0}")]
    ParseDecks(deck::DeckConfigError),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
    pub decks: HashMap<String, DeckConfig>,
}

impl Config {
    pub fn list_decks(&self) -> Vec<String> {
        let mut decks: Vec<String> = self.decks.keys().cloned().collect();
        decks.sort();
        decks
    }

    /// Directory deck files live in. Resolved by [`Config::get`].
    pub fn decks_dir(&self) -> PathBuf {
        self.settings.decks_dir.clone().unwrap_or_default()
    }

    /// Location of the persisted statistics table.
    pub fn statistics_file(&self) -> PathBuf {
        self.settings
            .statistics
            .directory
            .clone()
            .unwrap_or_default()
            .join("statistics.toml")
    }

    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "ReelQuiz", "ReelQuiz")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let mut settings_toml = config_dir.clone();
        settings_toml.push("settings.toml");

        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        let mut settings: Settings = settings.extract().map_err(Box::new)?;

        let decks_dir = settings.decks_dir.clone().unwrap_or_else(|| {
            let mut dir = config_dir.clone();
            dir.push("decks");
            dir
        });
        let decks = deck::get_decks(&decks_dir)?;
        settings.decks_dir = Some(decks_dir);

        if settings.statistics.directory.is_none() {
            let data_dir = ProjectDirs::from("com", "ReelQuiz", "ReelQuiz")
                .map_or_else(|| config_dir.clone(), |dirs| dirs.data_dir().to_path_buf());
            settings.statistics.directory = Some(data_dir);
        }

        Ok(Self { settings, decks })
    }
}
