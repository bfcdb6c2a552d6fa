use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{GeneratedTopic, RawQuestion};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{QuestionGenerator, parse_generated, prompt_for};
use crate::config::ChatConfig;
use crate::error::GeneratorError;

const SYSTEM_PROMPT: &str = "You write multiple-choice trivia. Reply with the JSON array only.";
const TEMPERATURE: f32 = 0.7;

/// Asks an OpenAI-compatible chat completions endpoint for questions.
#[derive(Clone)]
pub struct ChatGenerator {
    client: Client,
    config: ChatConfig,
}

impl ChatGenerator {
    /// # Errors
    ///
    /// Returns `GeneratorError::Http` if the HTTP client cannot be built.
    pub fn new(config: ChatConfig, timeout: Duration) -> Result<Self, GeneratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuestionGenerator for ChatGenerator {
    fn name(&self) -> &str {
        "chat"
    }

    async fn generate(&self, topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError> {
        let prompt = prompt_for(topic);
        let body = CompletionBody {
            model: &self.config.model,
            messages: [
                Turn {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Turn {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let reply: Value = response.json().await?;
        let text = reply_text(&reply).ok_or(GeneratorError::EmptyResponse)?;
        let parsed = parse_generated(text);
        debug!(
            target: "quiz::generate",
            model = %self.config.model,
            reply_len = text.len(),
            parsed = parsed.len(),
            "chat reply parsed"
        );
        Ok(parsed)
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: [Turn<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct Turn<'a> {
    role: &'static str,
    content: &'a str,
}

/// Content of the first choice, if it holds any non-blank text.
fn reply_text(reply: &Value) -> Option<&str> {
    reply
        .pointer("/choices/0/message/content")?
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let reply = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  [1, 2]  "}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        assert_eq!(reply_text(&reply), Some("[1, 2]"));
    }

    #[test]
    fn blank_or_missing_content_is_empty() {
        assert_eq!(reply_text(&json!({"choices": []})), None);
        assert_eq!(reply_text(&json!({"choices": [{"message": {"content": null}}]})), None);
        assert_eq!(reply_text(&json!({"choices": [{"message": {"content": "   "}}]})), None);
        assert_eq!(reply_text(&json!({"error": "rate limited"})), None);
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = ChatConfig {
            base_url: "https://api.example.com/v1/".into(),
            api_key: "sk-test".into(),
            model: "m".into(),
        };
        let generator = ChatGenerator::new(config, Duration::from_secs(1)).unwrap();
        assert_eq!(generator.endpoint(), "https://api.example.com/v1/chat/completions");
    }
}
