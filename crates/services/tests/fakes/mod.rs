#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{GeneratedTopic, RawQuestion};
use services::{GeneratorError, QuestionGenerator, TriviaApi, TriviaError, TriviaResponse, TriviaRow};
use tokio::sync::Notify;

/// Canned trivia API behaviour.
#[derive(Clone)]
pub enum TriviaReply {
    Rows(TriviaResponse),
    Status(u16),
    Malformed,
    Hang,
}

pub struct FakeTrivia {
    reply: TriviaReply,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeTrivia {
    pub fn new(reply: TriviaReply) -> Self {
        Self {
            reply,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold every fetch until `gate` is notified.
    pub fn gated(reply: TriviaReply, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TriviaApi for FakeTrivia {
    async fn fetch(&self, _category: &str, _amount: usize) -> Result<TriviaResponse, TriviaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            TriviaReply::Rows(response) => Ok(response.clone()),
            TriviaReply::Status(code) => Err(TriviaError::HttpStatus(
                reqwest::StatusCode::from_u16(*code).expect("valid status"),
            )),
            TriviaReply::Malformed => Err(TriviaError::Decode(
                serde_json::from_str::<TriviaResponse>("<html>oops</html>").unwrap_err(),
            )),
            TriviaReply::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn trivia_row(n: usize) -> TriviaRow {
    TriviaRow {
        category: "General Knowledge".into(),
        difficulty: "easy".into(),
        question: format!("Trivia question &quot;{n}&quot;?"),
        correct_answer: format!("right {n}"),
        incorrect_answers: vec![format!("wrong a{n}"), format!("wrong b{n}"), format!("wrong c{n}")],
    }
}

pub fn trivia_response(rows: Vec<TriviaRow>) -> TriviaResponse {
    TriviaResponse {
        response_code: if rows.is_empty() { 1 } else { 0 },
        results: rows,
    }
}

/// Generator replaying a fixed batch of raw questions.
pub struct ScriptedGenerator {
    raw: Vec<RawQuestion>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(raw: Vec<RawQuestion>) -> Self {
        Self {
            raw,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.raw.clone())
    }
}

/// Generator that always fails, like an unreachable inference endpoint.
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GeneratorError::Other("service unavailable".into()))
    }
}

/// Generator that never answers.
pub struct StalledGenerator;

#[async_trait]
impl QuestionGenerator for StalledGenerator {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn generate(&self, _topic: GeneratedTopic) -> Result<Vec<RawQuestion>, GeneratorError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

pub fn generated_raw(n: usize) -> RawQuestion {
    RawQuestion::new(
        format!("Generated question {n}?"),
        [format!("gen right {n}"), format!("gen a{n}"), format!("gen b{n}"), format!("gen c{n}")],
        format!("gen right {n}"),
    )
}
