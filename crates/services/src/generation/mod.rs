//! Network-backed question generators for the generated topic family.

mod chat;
mod inference;
mod parser;
mod prompt;

use async_trait::async_trait;
use quiz_core::model::{GeneratedTopic, RawQuestion};

use crate::error::GeneratorError;

pub use chat::ChatGenerator;
pub use inference::InferenceGenerator;
pub use parser::parse_generated;
pub use prompt::prompt_for;

/// One candidate in the generated-family chain.
///
/// Failures are logged and skipped by the source chain; an implementation
/// never needs to guarantee output.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError>;
}
