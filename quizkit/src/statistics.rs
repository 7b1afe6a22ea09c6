//! # Statistics Module - Cross-Round Aggregates
//!
//! Keeps the durable counters a quiz app shows between rounds: how many games
//! were played, the best game so far, and the running accuracy across all
//! rounds. The values live in an injected [`Storage`] key-value backend so
//! the engine stays independent of the persistence medium; [`MemoryStorage`]
//! is provided for tests and ephemeral embedders.
//!
//! Reads never fail: a missing or corrupted backing value degrades to the
//! zero default of its type.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

// Backend keys. `correct`/`total`/`date` hold the best-game triple,
// `correctTotal` the running sum feeding the accuracy recomputation.
const KEY_CORRECT: &str = "correct";
const KEY_TOTAL: &str = "total";
const KEY_DATE: &str = "date";
const KEY_GAMES_COUNT: &str = "gamesCount";
const KEY_TOTAL_ACCURACY: &str = "totalAccuracy";
const KEY_CORRECT_TOTAL: &str = "correctTotal";

/// Key-value persistence backend for [`Statistics`].
///
/// Getters are infallible by contract: implementations return the default for
/// anything missing or unreadable. Setters are best-effort; a statistics
/// hiccup must never interrupt a round.
pub trait Storage {
    /// Returns the stored integer, or 0 when absent.
    fn get_integer(&self, key: &str) -> i64;
    fn set_integer(&mut self, key: &str, value: i64);

    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);

    fn get_date(&self, key: &str) -> Option<DateTime<Utc>>;
    fn set_date(&mut self, key: &str, value: DateTime<Utc>);
}

/// Outcome of one completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub correct_answers: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
}

impl GameResult {
    /// Strict-greater record rule: a tie does not replace the stored best.
    pub const fn is_new_record(&self, correct_answers: u32) -> bool {
        correct_answers > self.correct_answers
    }
}

/// Accumulator for lifetime quiz statistics over a [`Storage`] backend.
#[derive(Debug)]
pub struct Statistics<S> {
    storage: S,
}

impl<S: Storage> Statistics<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Number of rounds stored so far. Monotonically non-decreasing.
    pub fn games_count(&self) -> u32 {
        self.storage.get_integer(KEY_GAMES_COUNT).max(0) as u32
    }

    /// The best round on record.
    ///
    /// An untouched backend reads as an all-zero result dated at the epoch.
    pub fn best_game(&self) -> GameResult {
        GameResult {
            correct_answers: self.storage.get_integer(KEY_CORRECT).max(0) as u32,
            total: self.storage.get_integer(KEY_TOTAL).max(0) as u32,
            date: self
                .storage
                .get_date(KEY_DATE)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// Lifetime accuracy as a two-decimal percent string, `"0.00"` when no
    /// round has been stored yet.
    pub fn total_accuracy(&self) -> String {
        self.storage
            .get_string(KEY_TOTAL_ACCURACY)
            .unwrap_or_else(|| "0.00".to_string())
    }

    /// Folds one completed round into the aggregates.
    ///
    /// Bumps the games counter, replaces the best game on a strictly higher
    /// score, and recomputes the lifetime accuracy. The accuracy denominator
    /// is fixed at ten questions per round regardless of `questions_amount`,
    /// so records written by differently-sized rounds stay comparable with
    /// everything stored before them.
    pub fn store(&mut self, correct_answers: u32, questions_amount: u32) {
        let games_count = self.games_count() + 1;
        self.storage
            .set_integer(KEY_GAMES_COUNT, i64::from(games_count));

        if self.best_game().is_new_record(correct_answers) {
            self.storage
                .set_integer(KEY_CORRECT, i64::from(correct_answers));
            self.storage
                .set_integer(KEY_TOTAL, i64::from(questions_amount));
            self.storage.set_date(KEY_DATE, Utc::now());
        }

        let correct_total =
            self.storage.get_integer(KEY_CORRECT_TOTAL).max(0) + i64::from(correct_answers);
        self.storage.set_integer(KEY_CORRECT_TOTAL, correct_total);

        let accuracy = correct_total as f64 / (10.0 * f64::from(games_count)) * 100.0;
        self.storage
            .set_string(KEY_TOTAL_ACCURACY, &format!("{accuracy:.2}"));
    }
}

/// In-memory [`Storage`] backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    integers: HashMap<String, i64>,
    strings: HashMap<String, String>,
    dates: HashMap<String, DateTime<Utc>>,
}

impl Storage for MemoryStorage {
    fn get_integer(&self, key: &str) -> i64 {
        self.integers.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: i64) {
        self.integers.insert(key.to_string(), value);
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    fn get_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.dates.get(key).copied()
    }

    fn set_date(&mut self, key: &str, value: DateTime<Utc>) {
        self.dates.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statistics() -> Statistics<MemoryStorage> {
        Statistics::new(MemoryStorage::default())
    }

    #[test]
    fn test_defaults_before_first_store() {
        let stats = statistics();
        assert_eq!(stats.games_count(), 0);
        assert_eq!(stats.total_accuracy(), "0.00");

        let best = stats.best_game();
        assert_eq!(best.correct_answers, 0);
        assert_eq!(best.total, 0);
        assert_eq!(best.date, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_first_store_creates_record() {
        let mut stats = statistics();
        let before = Utc::now();
        stats.store(7, 10);

        assert_eq!(stats.games_count(), 1);
        assert_eq!(stats.total_accuracy(), "70.00");

        let best = stats.best_game();
        assert_eq!(best.correct_answers, 7);
        assert_eq!(best.total, 10);
        assert!(best.date >= before);
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let mut stats = statistics();
        stats.store(7, 10);
        stats.store(5, 10);

        assert_eq!(stats.games_count(), 2);
        assert_eq!(stats.best_game().correct_answers, 7);
    }

    #[test]
    fn test_higher_score_replaces_record() {
        let mut stats = statistics();
        stats.store(5, 10);
        stats.store(9, 10);

        assert_eq!(stats.best_game().correct_answers, 9);
    }

    #[test]
    fn test_tie_does_not_replace_record() {
        let mut stats = statistics();
        stats.store(6, 10);
        let first_date = stats.best_game().date;
        stats.store(6, 10);

        assert_eq!(stats.best_game().correct_answers, 6);
        assert_eq!(stats.best_game().date, first_date);
    }

    #[test]
    fn test_accuracy_sums_over_rounds() {
        let mut stats = statistics();
        stats.store(10, 10);
        stats.store(5, 10);

        // (10 + 5) / (10 * 2) = 75%
        assert_eq!(stats.total_accuracy(), "75.00");
        assert_eq!(stats.games_count(), 2);
    }

    #[test]
    fn test_accuracy_denominator_is_fixed_at_ten() {
        let mut stats = statistics();
        // A five-question round still counts against a ten-question divisor.
        stats.store(5, 5);

        assert_eq!(stats.total_accuracy(), "50.00");
        assert_eq!(stats.best_game().total, 5);
    }

    #[test]
    fn test_zero_score_first_game_leaves_best_at_zero() {
        let mut stats = statistics();
        stats.store(0, 10);

        assert_eq!(stats.games_count(), 1);
        assert_eq!(stats.best_game().correct_answers, 0);
        assert_eq!(stats.total_accuracy(), "0.00");
    }
}
