use serde::Serialize;
use thiserror::Error;

use crate::model::Question;

/// Number of questions in one quiz attempt.
pub const QUIZ_LENGTH: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("a question set needs at least one question")]
    Empty,

    #[error("too many questions for one quiz: {len}")]
    TooMany { len: usize },
}

/// Ordered questions for one quiz attempt.
///
/// Order is fixed at acquisition time and never reshuffled during play.
/// A full set holds [`QUIZ_LENGTH`] questions; the trivia API path may hand
/// over fewer when rows fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for no questions and
    /// `QuestionSetError::TooMany` above [`QUIZ_LENGTH`].
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        if questions.len() > QUIZ_LENGTH {
            return Err(QuestionSetError::TooMany {
                len: questions.len(),
            });
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// True when the set holds exactly [`QUIZ_LENGTH`] questions.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.questions.len() == QUIZ_LENGTH
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize) -> Question {
        Question::new(
            format!("Q{n}?"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            "a",
        )
        .unwrap()
    }

    #[test]
    fn enforces_bounds() {
        assert_eq!(QuestionSet::new(Vec::new()).unwrap_err(), QuestionSetError::Empty);
        let too_many = (0..=QUIZ_LENGTH).map(question).collect();
        assert_eq!(
            QuestionSet::new(too_many).unwrap_err(),
            QuestionSetError::TooMany { len: QUIZ_LENGTH + 1 }
        );
    }

    #[test]
    fn full_set_is_reported() {
        let set = QuestionSet::new((0..QUIZ_LENGTH).map(question).collect()).unwrap();
        assert!(set.is_full());
        assert_eq!(set.get(0).map(Question::text), Some("Q0?"));

        let short = QuestionSet::new((0..7).map(question).collect()).unwrap();
        assert!(!short.is_full());
        assert_eq!(short.len(), 7);
    }
}
