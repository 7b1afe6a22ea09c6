use std::{collections::HashMap, path::PathBuf};

use derive_more::From;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum DeckConfigError {
    #[error("Failed to read decks directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to read file")]
    ReadFile(std::io::Error),

    #[error("Failed to parse file")]
    ParseFile(toml::de::Error),
}

/// Collects deck files from `from_dir` and adds the built-in deck.
///
/// A user deck named like the built-in one shadows it.
pub fn get_decks(from_dir: &PathBuf) -> Result<HashMap<String, DeckConfig>, DeckConfigError> {
    if !from_dir.exists() {
        std::fs::create_dir_all(from_dir)?;
    }

    let files = from_dir
        .read_dir()
        .map_err(|error| DeckConfigError::ReadDirectory {
            directory: from_dir.clone(),
            error,
        })?;

    let mut decks = HashMap::new();

    for entry in files {
        let dir_entry = entry?;
        let path = dir_entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            let content = std::fs::read_to_string(path)?;
            let deck: DeckConfig = toml::from_str(&content)?;
            decks.insert(deck.meta.name.clone(), deck);
        }
    }

    let builtin = builtin_deck();
    decks.entry(builtin.meta.name.clone()).or_insert(builtin);

    Ok(decks)
}

/// The deck compiled into the binary, so a fresh install has something to
/// play without any configuration.
pub fn builtin_deck() -> DeckConfig {
    // Safety: the embedded file ships with the crate and is covered by a
    // parse test
    toml::from_str(include_str!("../../decks/classics.toml")).expect("embedded deck is valid")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    pub meta: DeckMeta,
    /// Questions embedded directly in the deck file. When empty, the deck's
    /// command is run to produce them.
    #[serde(default)]
    pub questions: Vec<QuestionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckMeta {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub required_tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub text: String,
    pub answer: bool,
    /// Artwork path, relative to the decks directory.
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_deck_parses() {
        let deck = builtin_deck();
        assert_eq!(deck.meta.name, "classics");
        // A full round must be dealable out of the box
        assert!(deck.questions.len() >= 10);
        assert!(deck.meta.command.is_empty());
    }

    #[test]
    fn test_deck_file_parses_with_defaults() {
        let deck: DeckConfig = toml::from_str(
            r#"
            [meta]
            name = "imdb"
            description = "Questions generated from ratings"
            command = ["sh", "fetch.sh"]
            required_tools = ["sh"]

            [[questions]]
            text = "Rated above 6?"
            answer = true
            "#,
        )
        .unwrap();

        assert_eq!(deck.meta.name, "imdb");
        assert_eq!(deck.meta.command.len(), 2);
        assert_eq!(deck.questions.len(), 1);
        assert!(deck.questions[0].image.is_none());
        assert!(deck.questions[0].answer);
    }
}
