//! Turns raw question records from any source into validated [`Question`]s.

use rand::Rng;
use thiserror::Error;

use crate::model::{CHOICE_COUNT, Question, QuestionError, RawQuestion};
use crate::shuffle::shuffle;
use crate::text::decode_entities;

const WRONG_CHOICES: usize = CHOICE_COUNT - 1;

/// Why a raw record was dropped. Informational only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Rejection {
    #[error("question text is missing")]
    MissingQuestion,

    #[error("correct answer is missing")]
    MissingAnswer,

    #[error("only {distinct} distinct choices after deduplication")]
    TooFewChoices { distinct: usize },

    #[error(transparent)]
    Invalid(#[from] QuestionError),
}

/// Validate and canonicalize one raw record.
///
/// Entity references are decoded and surrounding whitespace trimmed. The
/// choices are the correct value plus the first three distinct options that
/// differ from it, in a freshly shuffled order.
///
/// # Errors
///
/// Returns a [`Rejection`] when the record cannot produce a valid question.
pub fn normalize<R: Rng + ?Sized>(raw: &RawQuestion, rng: &mut R) -> Result<Question, Rejection> {
    let text = clean(&raw.question);
    if text.is_empty() {
        return Err(Rejection::MissingQuestion);
    }

    let correct = clean(&raw.correct);
    if correct.is_empty() {
        return Err(Rejection::MissingAnswer);
    }

    let mut wrong: Vec<String> = Vec::with_capacity(WRONG_CHOICES);
    for option in raw.options.iter().map(|o| clean(o)) {
        if wrong.len() == WRONG_CHOICES {
            break;
        }
        if option.is_empty() || option == correct || wrong.contains(&option) {
            continue;
        }
        wrong.push(option);
    }

    if wrong.len() < WRONG_CHOICES {
        return Err(Rejection::TooFewChoices {
            distinct: wrong.len() + 1,
        });
    }

    let mut choices = Vec::with_capacity(CHOICE_COUNT);
    choices.push(correct.clone());
    choices.extend(wrong);
    shuffle(&mut choices, rng);

    Ok(Question::new(text, choices, correct)?)
}

fn clean(raw: &str) -> String {
    decode_entities(raw).trim().to_owned()
}
