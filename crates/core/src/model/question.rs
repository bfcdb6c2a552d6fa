use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

/// Every question offers exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected 4 choices, got {len}")]
    ChoiceCount { len: usize },

    #[error("choices cannot be empty")]
    EmptyChoice,

    #[error("duplicate choice: {0}")]
    DuplicateChoice(String),

    #[error("answer is not one of the choices")]
    AnswerNotInChoices,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
///
/// Holds exactly [`CHOICE_COUNT`] pairwise-distinct choices, one of which is
/// the answer. Choice order is whatever the caller supplied; the normalizer
/// shuffles before constructing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    choices: Vec<String>,
    answer: String,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, the choice count is not
    /// [`CHOICE_COUNT`], a choice is blank or repeated, or the answer is not
    /// among the choices.
    pub fn new(
        text: impl Into<String>,
        choices: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let answer = answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if choices.len() != CHOICE_COUNT {
            return Err(QuestionError::ChoiceCount { len: choices.len() });
        }

        let mut seen = HashSet::with_capacity(CHOICE_COUNT);
        for choice in &choices {
            if choice.trim().is_empty() {
                return Err(QuestionError::EmptyChoice);
            }
            if !seen.insert(choice.as_str()) {
                return Err(QuestionError::DuplicateChoice(choice.clone()));
            }
        }
        if !seen.contains(answer.as_str()) {
            return Err(QuestionError::AnswerNotInChoices);
        }

        Ok(Self {
            text,
            choices,
            answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Choice at a 1-based position, as shown to the player.
    #[must_use]
    pub fn choice_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.choices.get(idx))
            .map(String::as_str)
    }

    /// Exact, case-sensitive comparison against the answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn accepts_well_formed_question() {
        let q = Question::new("2 + 2?", choices(&["3", "4", "5", "22"]), "4").unwrap();
        assert_eq!(q.text(), "2 + 2?");
        assert_eq!(q.choices().len(), CHOICE_COUNT);
        assert_eq!(q.choice_at(2), Some("4"));
        assert_eq!(q.choice_at(0), None);
        assert_eq!(q.choice_at(5), None);
        assert!(q.is_correct("4"));
        assert!(!q.is_correct("four"));
    }

    #[test]
    fn rejects_invariant_violations() {
        assert_eq!(
            Question::new(" ", choices(&["a", "b", "c", "d"]), "a").unwrap_err(),
            QuestionError::EmptyText
        );
        assert_eq!(
            Question::new("q", choices(&["a", "b", "c"]), "a").unwrap_err(),
            QuestionError::ChoiceCount { len: 3 }
        );
        assert_eq!(
            Question::new("q", choices(&["a", "b", "b", "d"]), "a").unwrap_err(),
            QuestionError::DuplicateChoice("b".into())
        );
        assert_eq!(
            Question::new("q", choices(&["a", "b", "c", "d"]), "e").unwrap_err(),
            QuestionError::AnswerNotInChoices
        );
    }

    #[test]
    fn choice_equality_is_case_sensitive() {
        assert!(Question::new("q", choices(&["Paris", "paris", "Rome", "Oslo"]), "Paris").is_ok());
    }
}
