mod question;
mod question_set;
mod raw;
mod summary;
mod topic;

pub use question::{CHOICE_COUNT, Question, QuestionError};
pub use question_set::{QUIZ_LENGTH, QuestionSet, QuestionSetError};
pub use raw::RawQuestion;
pub use summary::{ScoreBand, ScoreSummary, ScoreSummaryError, percentage};
pub use topic::{CATALOG, GeneratedTopic, Topic, TopicError, TopicInfo};
