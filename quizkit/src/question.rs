/// A single yes/no trivia question.
///
/// Immutable once received. The image bytes are carried opaquely; decoding
/// and display are the embedder's concern, and an empty buffer is a valid
/// "no artwork" value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Raw artwork bytes, possibly empty.
    pub image: Vec<u8>,
    /// The question text, shown verbatim.
    pub text: String,
    /// The answer that counts as correct.
    pub correct_answer: bool,
}

impl Question {
    pub fn new(image: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }
}

/// Display model for one question step.
///
/// Produced by [`Round::convert`](crate::Round::convert) when a question is
/// installed. The counter is pre-formatted as `"{index + 1}/{amount}"` so the
/// display layer never needs to know the round internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStep {
    pub image: Vec<u8>,
    pub question: String,
    pub question_number: String,
}
