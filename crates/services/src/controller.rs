use std::fmt;
use std::sync::Arc;

use quiz_core::model::{QuestionSet, Topic};
use quiz_core::{Clock, QuizSession};
use tracing::{debug, info};

use crate::acquisition::QuestionSourceChain;
use crate::error::{AcquisitionError, ControllerError};

/// Claim on a pending quiz start. Consumed by
/// [`QuizController::finish_start`].
#[derive(Debug)]
pub struct StartTicket {
    generation: u64,
    topic: Topic,
}

impl StartTicket {
    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to an acquisition result handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { questions: usize },
    /// The controller was reset while acquiring; the result was dropped.
    Discarded,
}

/// Single owner of the quiz session, serializing quiz starts.
///
/// A start is split in two halves so the presentation layer can keep
/// handling input while questions are acquired: [`begin_start`] claims a
/// ticket and [`finish_start`] applies the acquired set. A reset in between
/// bumps the generation, which makes the outstanding ticket stale.
///
/// [`begin_start`]: Self::begin_start
/// [`finish_start`]: Self::finish_start
pub struct QuizController {
    chain: Arc<QuestionSourceChain>,
    session: QuizSession,
    generation: u64,
    pending: Option<u64>,
}

impl QuizController {
    #[must_use]
    pub fn new(chain: Arc<QuestionSourceChain>, clock: Clock) -> Self {
        Self {
            chain,
            session: QuizSession::with_clock(clock),
            generation: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn chain(&self) -> Arc<QuestionSourceChain> {
        Arc::clone(&self.chain)
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Mutable access for answering and advancing.
    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Claim a start for `topic`, dropping any previous attempt.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::AcquisitionPending` while another start is
    /// still acquiring.
    pub fn begin_start(&mut self, topic: Topic) -> Result<StartTicket, ControllerError> {
        if self.pending.is_some() {
            return Err(ControllerError::AcquisitionPending);
        }
        self.session.reset();
        self.generation += 1;
        self.pending = Some(self.generation);
        debug!(target: "quiz::controller", generation = self.generation, topic = %topic.id(), "start claimed");
        Ok(StartTicket {
            generation: self.generation,
            topic,
        })
    }

    /// Apply an acquisition result for `ticket`.
    ///
    /// A stale ticket leaves the session untouched and reports
    /// `StartOutcome::Discarded`, whatever the result was.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Acquisition` when the current ticket's
    /// acquisition failed.
    pub fn finish_start(
        &mut self,
        ticket: StartTicket,
        result: Result<QuestionSet, AcquisitionError>,
    ) -> Result<StartOutcome, ControllerError> {
        if self.pending != Some(ticket.generation) {
            debug!(target: "quiz::controller", generation = ticket.generation, "stale acquisition discarded");
            return Ok(StartOutcome::Discarded);
        }
        self.pending = None;

        let questions = result?;
        let count = questions.len();
        self.session.start(questions);
        info!(target: "quiz::controller", topic = %ticket.topic.id(), questions = count, "quiz started");
        Ok(StartOutcome::Started { questions: count })
    }

    /// Acquire and start in one step.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError` if a start is pending or acquisition fails.
    pub async fn start(&mut self, topic: Topic) -> Result<StartOutcome, ControllerError> {
        let ticket = self.begin_start(topic)?;
        let chain = self.chain();
        let result = chain.acquire(ticket.topic()).await;
        self.finish_start(ticket, result)
    }

    /// Return to idle and invalidate any outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.session.reset();
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("session", &self.session)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
