use std::path::Path;
use std::process::Command;
use std::string::FromUtf8Error;

use derive_more::From;
use quizkit::Question;
use serde::Deserialize;
use thiserror::Error;

use crate::config::deck::{DeckConfig, QuestionConfig};

#[derive(Debug, Error, From)]
pub enum DeckError {
    #[error("Unable to find '{tool}' in path: {error}")]
    #[from(skip)]
    ToolMissing { tool: String, error: which::Error },

    #[error("Failed to run deck command: {0}")]
    Run(std::io::Error),

    #[error("Deck command returned bad exit code: {status}\nStderr: {stderr}")]
    #[from(skip)]
    BadExit {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to decode deck command output: {0}")]
    Output(FromUtf8Error),

    #[error("Failed to parse questions: {0}")]
    Parse(toml::de::Error),

    #[error("The deck did not contain any questions")]
    Empty,

    #[error("The deck ran out of questions")]
    Exhausted,
}

/// Expected shape of a deck command's stdout.
#[derive(Debug, Deserialize)]
struct QuestionList {
    #[serde(default)]
    questions: Vec<QuestionConfig>,
}

/// A pool of fetched questions, dealt one at a time.
#[derive(Debug)]
pub struct Deck {
    questions: std::vec::IntoIter<Question>,
}

impl Deck {
    /// Loads the question pool for `config`: the questions embedded in the
    /// deck file, or the output of its command when it embeds none.
    pub fn load(decks_dir: &Path, config: &DeckConfig) -> Result<Self, DeckError> {
        let configs = if config.questions.is_empty() {
            run_command(decks_dir, config)?
        } else {
            config.questions.clone()
        };

        if configs.is_empty() {
            return Err(DeckError::Empty);
        }

        let questions: Vec<Question> = configs
            .into_iter()
            .map(|question| to_question(decks_dir, question))
            .collect();

        Ok(Self {
            questions: questions.into_iter(),
        })
    }

    /// Delivers the next question, or `None` when the pool is exhausted.
    pub fn request_next_question(&mut self) -> Option<Question> {
        self.questions.next()
    }

    /// Questions still left in the pool.
    pub fn remaining(&self) -> usize {
        self.questions.len()
    }
}

fn to_question(decks_dir: &Path, config: QuestionConfig) -> Question {
    // Missing artwork degrades to an empty buffer
    let image = config
        .image
        .map(|path| std::fs::read(decks_dir.join(path)).unwrap_or_default())
        .unwrap_or_default();

    Question::new(image, config.text, config.answer)
}

fn run_command(decks_dir: &Path, config: &DeckConfig) -> Result<Vec<QuestionConfig>, DeckError> {
    for tool in &config.meta.required_tools {
        which::which(tool).map_err(|error| DeckError::ToolMissing {
            tool: tool.clone(),
            error,
        })?;
    }

    let mut command_line = config.meta.command.iter();
    let Some(program) = command_line.next() else {
        return Err(DeckError::Empty);
    };

    let output = Command::new(program)
        .args(command_line)
        .current_dir(decks_dir)
        .output()?;

    if !output.status.success() {
        return Err(DeckError::BadExit {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    let list: QuestionList = toml::from_str(&stdout)?;
    Ok(list.questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::deck::builtin_deck;

    #[test]
    fn test_builtin_deck_loads() {
        let config = builtin_deck();
        let mut deck = Deck::load(Path::new("."), &config).unwrap();

        assert!(deck.remaining() >= 10);
        let first = deck.request_next_question().unwrap();
        assert!(!first.text.is_empty());
        assert!(first.image.is_empty());
    }

    #[test]
    fn test_deck_deals_until_exhausted() {
        let config = builtin_deck();
        let total = config.questions.len();
        let mut deck = Deck::load(Path::new("."), &config).unwrap();

        for _ in 0..total {
            assert!(deck.request_next_question().is_some());
        }
        assert!(deck.request_next_question().is_none());
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let config: DeckConfig = toml::from_str(
            r#"
            [meta]
            name = "empty"
            description = "No questions, no command"
            "#,
        )
        .unwrap();

        assert!(matches!(
            Deck::load(Path::new("."), &config),
            Err(DeckError::Empty)
        ));
    }

    #[test]
    fn test_command_output_parses() {
        let stdout = r#"
            [[questions]]
            text = "Rated above 6?"
            answer = false
        "#;
        let list: QuestionList = toml::from_str(stdout).unwrap();
        assert_eq!(list.questions.len(), 1);
        assert!(!list.questions[0].answer);
    }
}
