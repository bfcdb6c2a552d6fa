#![forbid(unsafe_code)]

pub mod acquisition;
pub mod config;
pub mod controller;
pub mod error;
pub mod generation;
pub mod templates;
pub mod trivia;

pub use quiz_core::Clock;

pub use acquisition::{MIN_GENERATED, QuestionSourceChain};
pub use config::{ChatConfig, InferenceConfig, QuizConfig};
pub use controller::{QuizController, StartOutcome, StartTicket};
pub use error::{AcquisitionError, ControllerError, GeneratorError, TriviaError};
pub use generation::{ChatGenerator, InferenceGenerator, QuestionGenerator, parse_generated};
pub use trivia::{OpenTdbClient, TriviaApi, TriviaResponse, TriviaRow};
