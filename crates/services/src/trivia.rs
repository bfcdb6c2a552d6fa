use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::RawQuestion;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::TriviaError;

/// Source of trivia API payloads. Faked in tests.
#[async_trait]
pub trait TriviaApi: Send + Sync {
    /// Fetch up to `amount` multiple-choice rows for `category`.
    async fn fetch(&self, category: &str, amount: usize) -> Result<TriviaResponse, TriviaError>;
}

/// Body returned by the Open Trivia Database `api.php` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriviaResponse {
    #[serde(default)]
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<TriviaRow>,
}

/// One result row; text fields are HTML-entity encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriviaRow {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

impl From<TriviaRow> for RawQuestion {
    fn from(row: TriviaRow) -> Self {
        RawQuestion {
            question: row.question,
            options: row.incorrect_answers,
            correct: row.correct_answer,
        }
    }
}

/// HTTP client for the Open Trivia Database.
#[derive(Clone, Debug)]
pub struct OpenTdbClient {
    client: Client,
    base_url: String,
}

impl OpenTdbClient {
    /// # Errors
    ///
    /// Returns `TriviaError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TriviaError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl TriviaApi for OpenTdbClient {
    async fn fetch(&self, category: &str, amount: usize) -> Result<TriviaResponse, TriviaError> {
        debug!(target: "quiz::trivia", category, amount, "requesting trivia questions");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("amount", amount.to_string().as_str()),
                ("category", category),
                ("type", "multiple"),
            ])
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(TriviaError::HttpStatus(response.status()));
        }

        let body = response.text().await.map_err(map_transport)?;
        let parsed: TriviaResponse = serde_json::from_str(&body)?;
        debug!(
            target: "quiz::trivia",
            response_code = parsed.response_code,
            rows = parsed.results.len(),
            "trivia response decoded"
        );
        Ok(parsed)
    }
}

fn map_transport(err: reqwest::Error) -> TriviaError {
    if err.is_timeout() {
        TriviaError::Timeout
    } else {
        TriviaError::Http(err)
    }
}
