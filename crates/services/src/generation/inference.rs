use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{GeneratedTopic, RawQuestion};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{QuestionGenerator, parse_generated, prompt_for};
use crate::config::InferenceConfig;
use crate::error::GeneratorError;

/// Asks a hosted text-generation model (Hugging Face inference style) for
/// questions.
#[derive(Clone)]
pub struct InferenceGenerator {
    client: Client,
    config: InferenceConfig,
}

impl InferenceGenerator {
    /// # Errors
    ///
    /// Returns `GeneratorError::Http` if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig, timeout: Duration) -> Result<Self, GeneratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl QuestionGenerator for InferenceGenerator {
    fn name(&self) -> &str {
        "inference"
    }

    async fn generate(&self, topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError> {
        let prompt = prompt_for(topic);
        let payload = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_new_tokens: 1000,
                temperature: 0.7,
                return_full_text: false,
            },
        };

        let mut request = self.client.post(&self.config.url).json(&payload);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let text = generated_text(&body);
        if text.trim().is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }

        let parsed = parse_generated(&text);
        debug!(target: "quiz::generate", parsed = parsed.len(), "inference reply parsed");
        Ok(parsed)
    }
}

/// Pull generated text out of whatever shape the endpoint replied with:
/// `[{"generated_text": ..}]`, `{"generated_text": ..}`, a bare JSON string,
/// or raw text.
fn generated_text(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    match &value {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("generated_text")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string),
        Value::Array(items) => {
            let texts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("generated_text").and_then(Value::as_str))
                .collect();
            if texts.is_empty() {
                body.to_string()
            } else {
                texts.join("\n")
            }
        }
        _ => body.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}
