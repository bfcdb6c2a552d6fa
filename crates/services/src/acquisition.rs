use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use quiz_core::model::{GeneratedTopic, QUIZ_LENGTH, Question, QuestionSet, RawQuestion, Topic};
use quiz_core::{normalize, shuffle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::config::{DEFAULT_GENERATION_PASSES, DEFAULT_TIMEOUT, QuizConfig};
use crate::error::{AcquisitionError, GeneratorError, TriviaError};
use crate::generation::{ChatGenerator, InferenceGenerator, QuestionGenerator};
use crate::templates;
use crate::trivia::{OpenTdbClient, TriviaApi};

/// Below this many generated questions the template tables take over.
pub const MIN_GENERATED: usize = 5;

/// Produces the question set for a quiz start.
///
/// Remote topics come from the trivia API and can fail. Generated topics try
/// each [`QuestionGenerator`] in order and fall back to the template tables,
/// so they always yield [`QUIZ_LENGTH`] questions.
pub struct QuestionSourceChain {
    trivia: Arc<dyn TriviaApi>,
    generators: Vec<Arc<dyn QuestionGenerator>>,
    timeout: Duration,
    passes: usize,
    rng: Mutex<StdRng>,
}

impl QuestionSourceChain {
    #[must_use]
    pub fn new(trivia: Arc<dyn TriviaApi>) -> Self {
        Self {
            trivia,
            generators: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            passes: DEFAULT_GENERATION_PASSES,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Wire the real HTTP sources described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError::Http` if an HTTP client cannot be built.
    pub fn from_config(config: &QuizConfig) -> Result<Self, TriviaError> {
        let trivia = OpenTdbClient::new(config.trivia_url.clone(), config.timeout)?;
        let mut chain = Self::new(Arc::new(trivia))
            .with_timeout(config.timeout)
            .with_passes(config.generation_passes);

        if let Some(inference) = &config.inference {
            match InferenceGenerator::new(inference.clone(), config.timeout) {
                Ok(generator) => chain = chain.with_generator(Arc::new(generator)),
                Err(err) => warn!(target: "quiz::acquire", %err, "inference generator disabled"),
            }
        }
        if let Some(chat) = &config.chat {
            match ChatGenerator::new(chat.clone(), config.timeout) {
                Ok(generator) => chain = chain.with_generator(Arc::new(generator)),
                Err(err) => warn!(target: "quiz::acquire", %err, "chat generator disabled"),
            }
        }
        Ok(chain)
    }

    /// Append a candidate; candidates run in insertion order.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn QuestionGenerator>) -> Self {
        self.generators.push(generator);
        self
    }

    /// Upper bound on each outbound call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes.max(1);
        self
    }

    /// Seed the shared random source, for reproducible ordering.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    #[must_use]
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Obtain the question set for `topic`.
    ///
    /// # Errors
    ///
    /// Only remote topics fail: `AcquisitionError::NoQuestions` when the API
    /// reports no usable rows, `AcquisitionError::Trivia` when the request
    /// itself fails or times out.
    #[instrument(target = "quiz::acquire", skip(self, topic), fields(topic = %topic.id()))]
    pub async fn acquire(&self, topic: &Topic) -> Result<QuestionSet, AcquisitionError> {
        let set = match topic {
            Topic::Remote { category } => self.acquire_remote(category).await?,
            Topic::Generated(generated) => self.acquire_generated(*generated).await?,
        };
        info!(target: "quiz::acquire", questions = set.len(), "question set ready");
        Ok(set)
    }

    async fn acquire_remote(&self, category: &str) -> Result<QuestionSet, AcquisitionError> {
        let response = tokio::time::timeout(self.timeout, self.trivia.fetch(category, QUIZ_LENGTH))
            .await
            .map_err(|_| TriviaError::Timeout)??;

        if response.results.is_empty() {
            warn!(
                target: "quiz::acquire",
                category,
                response_code = response.response_code,
                "trivia API returned no results"
            );
            return Err(no_questions(category));
        }

        let rows = response.results.len();
        let questions = self.normalize_all(response.results.into_iter().map(RawQuestion::from));
        if questions.len() < rows {
            // Shortfall is passed through; the API is trusted to send usable rows.
            warn!(
                target: "quiz::acquire",
                rows,
                valid = questions.len(),
                "some trivia rows were rejected"
            );
        }

        self.finalize(questions)
            .map_err(|_| no_questions(category))
    }

    async fn acquire_generated(
        &self,
        topic: GeneratedTopic,
    ) -> Result<QuestionSet, AcquisitionError> {
        let mut accepted: Vec<Question> = Vec::new();

        for pass in 0..self.passes {
            let added = self.run_candidates(topic, &mut accepted).await;
            debug!(target: "quiz::acquire", pass, added, total = accepted.len(), "generation pass done");
            if accepted.len() >= QUIZ_LENGTH || added == 0 || accepted.len() < MIN_GENERATED {
                break;
            }
        }

        if accepted.len() < MIN_GENERATED {
            info!(
                target: "quiz::acquire",
                generated = accepted.len(),
                "falling back to template questions"
            );
            accepted = self.with_rng(|rng| templates::generate(topic, rng));
        } else if accepted.len() < QUIZ_LENGTH {
            let padding = self.with_rng(|rng| templates::generate(topic, rng));
            extend_unique(&mut accepted, padding, QUIZ_LENGTH);
        }

        self.finalize(accepted)
            .map_err(|_| no_questions(topic.id()))
    }

    /// Run every candidate once, appending valid questions whose text is not
    /// already held. Later candidates are skipped once a full quiz is held,
    /// but a candidate's whole output is kept so the final shuffle can pick
    /// from all of it. Returns the number of questions added.
    async fn run_candidates(&self, topic: GeneratedTopic, accepted: &mut Vec<Question>) -> usize {
        let before = accepted.len();

        for generator in &self.generators {
            if accepted.len() >= QUIZ_LENGTH {
                break;
            }

            let raw = match tokio::time::timeout(self.timeout, generator.generate(topic)).await {
                Ok(Ok(raw)) => raw,
                Ok(Err(err)) => {
                    warn!(target: "quiz::acquire", generator = generator.name(), %err, "generator failed, trying next");
                    continue;
                }
                Err(_) => {
                    let err = GeneratorError::Timeout;
                    warn!(target: "quiz::acquire", generator = generator.name(), %err, "generator failed, trying next");
                    continue;
                }
            };

            let fresh = self.normalize_all(raw);
            debug!(target: "quiz::acquire", generator = generator.name(), valid = fresh.len(), "generator output normalized");
            extend_unique(accepted, fresh, usize::MAX);
        }

        accepted.len() - before
    }

    fn normalize_all(&self, raw: impl IntoIterator<Item = RawQuestion>) -> Vec<Question> {
        self.with_rng(|rng| {
            raw.into_iter()
                .filter_map(|record| match normalize(&record, rng) {
                    Ok(question) => Some(question),
                    Err(reason) => {
                        debug!(target: "quiz::acquire", %reason, question = %record.question, "raw question rejected");
                        None
                    }
                })
                .collect()
        })
    }

    /// Shuffle everything accumulated and keep the first [`QUIZ_LENGTH`].
    fn finalize(
        &self,
        mut questions: Vec<Question>,
    ) -> Result<QuestionSet, quiz_core::model::QuestionSetError> {
        self.with_rng(|rng| shuffle(&mut questions, rng));
        questions.truncate(QUIZ_LENGTH);
        QuestionSet::new(questions)
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

/// Append questions from `extra` whose text is not already held, stopping
/// once `accepted` holds `limit` questions.
fn extend_unique(accepted: &mut Vec<Question>, extra: Vec<Question>, limit: usize) {
    let mut seen: HashSet<String> = accepted.iter().map(|q| q.text().to_owned()).collect();
    for question in extra {
        if accepted.len() >= limit {
            break;
        }
        if seen.insert(question.text().to_owned()) {
            accepted.push(question);
        }
    }
}

fn no_questions(topic: &str) -> AcquisitionError {
    AcquisitionError::NoQuestions {
        topic: topic.to_owned(),
    }
}
