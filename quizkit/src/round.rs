//! # Round Module - Question Sequencing and Scoring
//!
//! A [`Round`] deals a fixed number of questions, scores each yes/no answer
//! and reports a terminal outcome after the last one. It never talks to a
//! question source or a screen directly: the embedder feeds questions in with
//! [`Round::receive_question`] and reacts to the [`Outcome`] of
//! [`Round::decide`].
//!
//! ## Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/round_lifecycle.mmd")]
//!
//! ## Usage
//!
//! ```rust
//! use quizkit::{Outcome, Question, Round};
//!
//! let mut round = Round::new(2).unwrap();
//!
//! let step = round
//!     .receive_question(Some(Question::new(vec![], "Directed by Kubrick?", true)))
//!     .unwrap();
//! assert_eq!(step.question_number, "1/2");
//!
//! assert_eq!(round.answer(true), Some(true));
//! assert_eq!(round.decide(), Some(Outcome::NextQuestion));
//!
//! round.receive_question(Some(Question::new(vec![], "Released in 1999?", false)));
//! round.answer(true);
//! assert_eq!(
//!     round.decide(),
//!     Some(Outcome::RoundComplete { correct_answers: 1, total: 2 })
//! );
//! ```

use crate::question::{Question, QuizStep};

/// Where a round currently is in its cycle.
///
/// The phase gates every mutating operation, so stale callbacks (an answer
/// arriving twice, a decision fired for an abandoned round) fall through as
/// no-ops instead of corrupting the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the question source to deliver.
    AwaitingQuestion,
    /// A question is installed and answerable.
    QuestionShown,
    /// The answer is scored; a decision is pending.
    AnswerRecorded,
    /// The last question was decided; only `restart` leaves this phase.
    RoundComplete,
}

/// The decision taken after an answer has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The round continues; the caller should request the next question.
    NextQuestion,
    /// The round is over. Reported exactly once per round.
    RoundComplete {
        correct_answers: usize,
        total: usize,
    },
}

/// State machine for one quiz round of a fixed number of questions.
///
/// Not thread-safe by design: all transitions are expected to run on the one
/// event-processing context the embedder owns.
#[derive(Debug, Clone)]
pub struct Round {
    questions_amount: usize,
    current_index: usize,
    correct_answers: usize,
    current_question: Option<Question>,
    phase: Phase,
}

impl Round {
    /// Creates a round of `questions_amount` questions.
    ///
    /// Returns `None` for a zero-length round, which has no meaningful
    /// lifecycle. The amount is fixed for the lifetime of the value.
    pub fn new(questions_amount: usize) -> Option<Self> {
        if questions_amount == 0 {
            return None;
        }

        Some(Self {
            questions_amount,
            current_index: 0,
            correct_answers: 0,
            current_question: None,
            phase: Phase::AwaitingQuestion,
        })
    }

    pub const fn questions_amount(&self) -> usize {
        self.questions_amount
    }

    /// Zero-based index of the question currently being played.
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    pub const fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_last_question(&self) -> bool {
        self.current_index == self.questions_amount - 1
    }

    /// Builds the display model for a question at the current position.
    pub fn convert(&self, question: &Question) -> QuizStep {
        QuizStep {
            image: question.image.clone(),
            question: question.text.clone(),
            question_number: format!("{}/{}", self.current_index + 1, self.questions_amount),
        }
    }

    /// Installs the next question delivered by the source.
    ///
    /// `None` models a delivery failure and leaves the round untouched; the
    /// caller is responsible for surfacing that separately. Returns the
    /// display step for an installed question.
    pub fn receive_question(&mut self, question: Option<Question>) -> Option<QuizStep> {
        let question = question?;
        let step = self.convert(&question);
        self.current_question = Some(question);
        self.phase = Phase::QuestionShown;
        Some(step)
    }

    /// Records a yes/no answer for the current question.
    ///
    /// Returns whether the answer was correct, or `None` when no question is
    /// answerable (nothing delivered yet, or the answer was already
    /// recorded). A correct answer bumps the tally; either way the round
    /// moves to [`Phase::AnswerRecorded`] and awaits [`Round::decide`].
    pub fn answer(&mut self, is_yes: bool) -> Option<bool> {
        if self.phase != Phase::QuestionShown {
            return None;
        }
        let question = self.current_question.as_ref()?;

        let is_correct = question.correct_answer == is_yes;
        if is_correct {
            self.correct_answers += 1;
        }
        self.phase = Phase::AnswerRecorded;

        Some(is_correct)
    }

    /// Decides between the next question and the end of the round.
    ///
    /// Only acts in [`Phase::AnswerRecorded`]; any other phase returns `None`,
    /// which makes a decision scheduled before a [`Round::restart`] harmless.
    /// On the last question this reports the final tally and parks the round
    /// in [`Phase::RoundComplete`]; otherwise it advances the index and waits
    /// for the next delivery.
    pub fn decide(&mut self) -> Option<Outcome> {
        if self.phase != Phase::AnswerRecorded {
            return None;
        }

        self.current_question = None;

        if self.is_last_question() {
            self.phase = Phase::RoundComplete;
            return Some(Outcome::RoundComplete {
                correct_answers: self.correct_answers,
                total: self.questions_amount,
            });
        }

        self.current_index += 1;
        self.phase = Phase::AwaitingQuestion;
        Some(Outcome::NextQuestion)
    }

    /// Resets the round to its initial state.
    ///
    /// Legal in any phase: restarting while a decision is still pending
    /// abandons that decision (cancel-and-restart). The caller re-requests
    /// the first question afterwards.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.correct_answers = 0;
        self.current_question = None;
        self.phase = Phase::AwaitingQuestion;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_answer: bool) -> Question {
        Question::new(vec![], "Is this film rated above 6?", correct_answer)
    }

    #[test]
    fn test_new_round() {
        let round = Round::new(10).unwrap();
        assert_eq!(round.questions_amount(), 10);
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.correct_answers(), 0);
        assert_eq!(round.phase(), Phase::AwaitingQuestion);

        assert!(Round::new(0).is_none());
    }

    #[test]
    fn test_receive_question_none_is_noop() {
        let mut round = Round::new(10).unwrap();
        assert!(round.receive_question(None).is_none());
        assert_eq!(round.phase(), Phase::AwaitingQuestion);
        assert!(round.answer(true).is_none());
    }

    #[test]
    fn test_convert_formats_counter() {
        let round = Round::new(10).unwrap();
        let step = round.convert(&Question::new(vec![1, 2], "The Godfather?", true));
        assert_eq!(step.question_number, "1/10");
        assert_eq!(step.question, "The Godfather?");
        assert_eq!(step.image, vec![1, 2]);
    }

    #[test]
    fn test_answer_without_question_changes_nothing() {
        let mut round = Round::new(10).unwrap();
        assert!(round.answer(true).is_none());
        assert!(round.answer(false).is_none());
        assert_eq!(round.correct_answers(), 0);
        assert_eq!(round.current_index(), 0);
    }

    #[test]
    fn test_answer_scores_and_guards_double_submission() {
        let mut round = Round::new(10).unwrap();
        round.receive_question(Some(question(true)));

        assert_eq!(round.answer(true), Some(true));
        assert_eq!(round.correct_answers(), 1);

        // Second submission for the same question is swallowed
        assert!(round.answer(true).is_none());
        assert_eq!(round.correct_answers(), 1);
    }

    #[test]
    fn test_wrong_answer_does_not_score() {
        let mut round = Round::new(10).unwrap();
        round.receive_question(Some(question(false)));

        assert_eq!(round.answer(true), Some(false));
        assert_eq!(round.correct_answers(), 0);
    }

    #[test]
    fn test_decide_requires_recorded_answer() {
        let mut round = Round::new(10).unwrap();
        assert!(round.decide().is_none());

        round.receive_question(Some(question(true)));
        assert!(round.decide().is_none());

        round.answer(true);
        assert_eq!(round.decide(), Some(Outcome::NextQuestion));

        // Already decided
        assert!(round.decide().is_none());
    }

    #[test]
    fn test_round_completes_exactly_once_after_ten_answers() {
        let mut round = Round::new(10).unwrap();
        let mut completions = 0;
        let mut requests = 1; // The first question is requested up front

        for _ in 0..10 {
            round.receive_question(Some(question(true)));
            round.answer(true);
            match round.decide().unwrap() {
                Outcome::NextQuestion => requests += 1,
                Outcome::RoundComplete {
                    correct_answers,
                    total,
                } => {
                    completions += 1;
                    assert_eq!(correct_answers, 10);
                    assert_eq!(total, 10);
                }
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(requests, 10); // Never an 11th question
        assert_eq!(round.phase(), Phase::RoundComplete);
    }

    #[test]
    fn test_alternating_correct_answers_score_full_round() {
        let mut round = Round::new(10).unwrap();

        for i in 0..10 {
            let correct_answer = i % 2 == 0;
            let step = round.receive_question(Some(question(correct_answer))).unwrap();
            assert_eq!(step.question_number, format!("{}/10", i + 1));

            assert_eq!(round.answer(correct_answer), Some(true));
            assert!(round.correct_answers() <= round.current_index() + 1);
            round.decide();
        }

        assert_eq!(round.correct_answers(), 10);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut round = Round::new(10).unwrap();
        round.receive_question(Some(question(true)));
        round.answer(true);
        round.decide();
        round.receive_question(Some(question(true)));
        round.answer(true);

        round.restart();
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.correct_answers(), 0);
        assert_eq!(round.phase(), Phase::AwaitingQuestion);

        // A decision scheduled before the restart lands as a no-op
        assert!(round.decide().is_none());
    }

    #[test]
    fn test_restart_after_completion_starts_a_new_cycle() {
        let mut round = Round::new(2).unwrap();
        round.receive_question(Some(question(true)));
        round.answer(true);
        round.decide();
        round.receive_question(Some(question(true)));
        round.answer(false);
        assert_eq!(
            round.decide(),
            Some(Outcome::RoundComplete {
                correct_answers: 1,
                total: 2
            })
        );

        round.restart();
        let step = round.receive_question(Some(question(true))).unwrap();
        assert_eq!(step.question_number, "1/2");
    }
}
