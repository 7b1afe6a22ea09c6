//! # QuizKit
//!
//! A small engine for quiz games that deal a fixed number of yes/no questions
//! per round. It owns the two pieces that are independent of any user
//! interface:
//!
//! - [`Round`]: the state machine that sequences questions, scores answers
//!   and decides when a round is over.
//! - [`Statistics`]: the accumulator for cross-round aggregates (games
//!   played, best game, running accuracy), persisted through an injected
//!   [`Storage`] key-value backend.
//!
//! Everything else (rendering, question delivery, pacing delays) belongs to
//! the embedding application.

mod question;
mod round;
mod statistics;

pub use question::*;
pub use round::*;
pub use statistics::*;
