#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod normalize;
pub mod quiz;
pub mod shuffle;
pub mod text;
pub mod time;

pub use error::Error;
pub use normalize::{Rejection, normalize};
pub use quiz::{AnswerOutcome, Progress, QuizSession, SessionPhase};
pub use shuffle::{shuffle, shuffled};
pub use time::Clock;
