use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{Event, KeyCode};
use derive_more::From;
use quizkit::{Outcome, QuizStep, Round, Statistics};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use thiserror::Error;

use crate::{
    config::{Config, DeckConfig},
    deck::{Deck, DeckError},
    storage::{StorageError, TomlStorage},
    utils::{ROUNDED_BLOCK, center, centered_padding},
};

use super::Message;

/// Questions dealt per round.
pub const QUESTIONS_AMOUNT: usize = 10;

/// Pause between scoring an answer and moving on, so the verdict stays
/// readable. Answer input is locked for the duration.
const REVEAL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error, From)]
pub enum CreateSessionError {
    #[error("Failed to load questions: {0}")]
    Deck(DeckError),

    #[error("Failed to open statistics: {0}")]
    Storage(StorageError),
}

/// Verdict feedback pending its reveal deadline.
struct Reveal {
    correct: bool,
    until: Instant,
}

enum State {
    /// A question is on screen, possibly with its verdict being revealed.
    Playing,
    /// The round-summary modal is up, waiting for dismissal.
    Complete { title: String, lines: Vec<String> },
}

/// Page: Quiz session
///
/// Owns one running round: it deals questions from the deck, scores answers,
/// paces the verdict reveal and folds finished rounds into the statistics.
pub struct Session {
    round: Round,
    deck: Deck,
    statistics: Statistics<TomlStorage>,
    step: Option<QuizStep>,
    reveal: Option<Reveal>,
    state: State,
}

impl Session {
    pub fn new(
        decks_dir: &Path,
        deck_config: DeckConfig,
        statistics_file: PathBuf,
    ) -> Result<Self, CreateSessionError> {
        let mut deck = Deck::load(decks_dir, &deck_config)?;
        let statistics = Statistics::new(TomlStorage::open(statistics_file)?);

        // Safety: QUESTIONS_AMOUNT is a non-zero constant
        let mut round = Round::new(QUESTIONS_AMOUNT).expect("non-zero round length");
        let step = round.receive_question(deck.request_next_question());
        if step.is_none() {
            return Err(CreateSessionError::Deck(DeckError::Empty));
        }

        Ok(Self {
            round,
            deck,
            statistics,
            step,
            reveal: None,
            state: State::Playing,
        })
    }
}

// Round flow
impl Session {
    fn submit_answer(&mut self, is_yes: bool) {
        // Controls are locked while the verdict is showing
        if self.reveal.is_some() {
            return;
        }

        if let Some(correct) = self.round.answer(is_yes) {
            self.reveal = Some(Reveal {
                correct,
                until: Instant::now() + REVEAL_DELAY,
            });
        }
    }

    fn advance(&mut self) -> Option<Message> {
        match self.round.decide()? {
            Outcome::NextQuestion => {
                self.step = self.round.receive_question(self.deck.request_next_question());
                self.step
                    .is_none()
                    .then(|| Message::Error(Box::new(DeckError::Exhausted) as _))
            }
            Outcome::RoundComplete {
                correct_answers,
                total,
            } => {
                self.statistics
                    .store(correct_answers as u32, total as u32);
                self.state = self.summary(correct_answers, total);
                None
            }
        }
    }

    fn summary(&self, correct_answers: usize, total: usize) -> State {
        let title = if correct_answers == total {
            format!("Congratulations, a perfect {correct_answers}/{total}!")
        } else {
            "This round is over!".to_string()
        };

        let best = self.statistics.best_game();
        let record_date = best.date.with_timezone(&Local).format("%d.%m.%y %H:%M");
        let lines = vec![
            format!("Your result: {correct_answers}/{total}"),
            format!("Quizzes played: {}", self.statistics.games_count()),
            format!(
                "Record: {}/{} ({record_date})",
                best.correct_answers, best.total
            ),
            format!("Average accuracy: {}%", self.statistics.total_accuracy()),
        ];

        State::Complete { title, lines }
    }

    /// Starts the next round over the same deck, counters zeroed.
    fn play_again(&mut self) -> Option<Message> {
        self.round.restart();
        self.reveal = None;
        self.step = self.round.receive_question(self.deck.request_next_question());

        if self.step.is_none() {
            return Some(Message::Error(Box::new(DeckError::Exhausted)));
        }

        self.state = State::Playing;
        None
    }
}

// Rendering logic
impl Session {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match &self.state {
            State::Playing => self.render_question(frame, area, config),
            State::Complete { title, lines } => {
                Self::render_summary(frame, area, config, title, lines);
            }
        }
    }

    pub fn render_top(&mut self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw(format!(
            "Score: {}/{}",
            self.round.correct_answers(),
            self.round.questions_amount()
        )))
    }

    fn render_question(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let Some(step) = &self.step else { return };
        let theme = &config.settings.theme.text;

        let border_style = match self.reveal.as_ref() {
            Some(reveal) if reveal.correct => Style::new().fg(theme.success),
            Some(_) => Style::new().fg(theme.error),
            None => Style::new(),
        };

        let controls = if self.reveal.is_some() {
            Line::styled(" answer locked ", Style::new().fg(theme.dimmed))
        } else {
            Line::from(vec![
                Span::styled(" <Y>", Style::new().fg(theme.highlight).bold()),
                Span::raw("es / "),
                Span::styled("<N>", Style::new().fg(theme.highlight).bold()),
                Span::raw("o "),
            ])
        };

        let area = center(area, Constraint::Percentage(70), Constraint::Percentage(60));
        let block = ROUNDED_BLOCK
            .border_style(border_style)
            .title_top(Line::raw(format!(" {} ", step.question_number)).right_aligned())
            .title_bottom(controls.centered());
        let content = block.inner(area);

        let height = (step.question.len() as u16).div_ceil(content.width.max(1));
        let question = Paragraph::new(Line::from(step.question.as_str().bold()))
            .wrap(Wrap { trim: false })
            .centered()
            .block(Block::new().padding(centered_padding(content, Some(height), None)));

        frame.render_widget(block, area);
        frame.render_widget(question, content);
    }

    fn render_summary(
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        title: &str,
        lines: &[String],
    ) {
        let theme = &config.settings.theme.text;
        let area = center(area, Constraint::Percentage(60), Constraint::Percentage(60));

        let mut text = vec![
            Line::styled(title.to_string(), Style::new().bold().fg(theme.highlight)),
            Line::raw(""),
        ];
        text.extend(lines.iter().map(|line| Line::raw(line.as_str())));
        text.push(Line::raw(""));
        text.push(Line::styled(
            "Press <Enter> to play again",
            Style::new().fg(theme.dimmed),
        ));

        let height = text.len() as u16;
        let summary = Paragraph::new(text)
            .centered()
            .block(ROUNDED_BLOCK.padding(centered_padding(area, Some(height), None)));

        frame.render_widget(summary, area);
    }
}

// Event handlers
impl Session {
    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        let Event::Key(key) = event else { return None };
        if !key.is_press() {
            return None;
        }

        match &self.state {
            State::Playing => match key.code {
                KeyCode::Char('y' | 'Y') => self.submit_answer(true),
                KeyCode::Char('n' | 'N') => self.submit_answer(false),
                _ => (),
            },
            State::Complete { .. } => {
                if key.code == KeyCode::Enter {
                    return self.play_again();
                }
            }
        }

        None
    }

    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        if let Some(reveal) = &self.reveal
            && Instant::now() >= reveal.until
        {
            self.reveal = None;
            return self.advance();
        }

        None
    }
}
