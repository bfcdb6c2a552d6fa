use thiserror::Error;

use crate::model::{QuestionError, QuestionSetError, ScoreSummaryError, TopicError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionSet(#[from] QuestionSetError),
    #[error(transparent)]
    Summary(#[from] ScoreSummaryError),
    #[error(transparent)]
    Topic(#[from] TopicError),
}
