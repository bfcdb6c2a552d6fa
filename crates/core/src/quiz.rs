use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Question, QuestionSet, ScoreSummary, percentage};
use crate::time::Clock;

/// Lifecycle of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Complete,
}

/// Outcome of the first answer recorded for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub chosen: String,
    pub answer: String,
    pub correct: bool,
}

/// 1-based position of the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Share of the quiz reached, including the current question.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f32 / self.total as f32
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one walk through a question set.
///
/// `Idle → InProgress → Complete`; `reset` returns to `Idle` from anywhere.
/// Calls that do not apply to the current phase are ignored and report
/// `false`/`None`.
pub struct QuizSession {
    clock: Clock,
    phase: SessionPhase,
    questions: Option<QuestionSet>,
    current: usize,
    score: usize,
    answered_current: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Clock::default())
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            phase: SessionPhase::Idle,
            questions: None,
            current: 0,
            score: 0,
            answered_current: false,
            started_at: None,
            completed_at: None,
        }
    }

    /// Begin a quiz. Only applies from `Idle`.
    pub fn start(&mut self, questions: QuestionSet) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.questions = Some(questions);
        self.current = 0;
        self.score = 0;
        self.answered_current = false;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.phase = SessionPhase::InProgress;
        true
    }

    /// Record the first answer for the current question.
    ///
    /// Further answers before [`advance`](Self::advance) are ignored, so a
    /// question is scored at most once.
    pub fn record_answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::InProgress || self.answered_current {
            return None;
        }
        let question = self.current_question()?;
        let correct = question.is_correct(choice);
        let outcome = AnswerOutcome {
            chosen: choice.to_owned(),
            answer: question.answer().to_owned(),
            correct,
        };

        self.answered_current = true;
        if correct {
            self.score += 1;
        }
        Some(outcome)
    }

    /// Answer with the choice at a 1-based position. Out-of-range positions
    /// are ignored.
    pub fn record_choice(&mut self, position: usize) -> Option<AnswerOutcome> {
        let choice = self.current_question()?.choice_at(position)?.to_owned();
        self.record_answer(&choice)
    }

    /// Move to the next question, completing the quiz after the last one.
    pub fn advance(&mut self) -> bool {
        if self.phase != SessionPhase::InProgress {
            return false;
        }
        self.current += 1;
        if self.current >= self.total() {
            self.current = self.total();
            self.phase = SessionPhase::Complete;
            self.completed_at = Some(self.clock.now());
        } else {
            self.answered_current = false;
        }
        true
    }

    /// Drop the current attempt, including its questions.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.questions = None;
        self.current = 0;
        self.score = 0;
        self.answered_current = false;
        self.started_at = None;
        self.completed_at = None;
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn answered_current(&self) -> bool {
        self.answered_current
    }

    /// Number of questions in the running attempt; 0 when idle.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    #[must_use]
    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.questions.as_ref()?.get(self.current)
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.current_question().map(|_| Progress {
            position: self.current + 1,
            total: self.total(),
        })
    }

    /// Rounded score percentage, available once the quiz is complete.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        self.is_complete()
            .then(|| percentage(self.score, self.total()))
    }

    /// Final tally, available once the quiz is complete.
    #[must_use]
    pub fn summary(&self) -> Option<ScoreSummary> {
        if !self.is_complete() {
            return None;
        }
        let started_at = self.started_at?;
        let completed_at = self.completed_at?;
        ScoreSummary::new(self.score, self.total(), started_at, completed_at).ok()
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("questions_len", &self.total())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answered_current", &self.answered_current)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QUIZ_LENGTH, ScoreBand};
    use crate::time::test_util::{frozen_clock, frozen_now};

    fn build_set(len: usize) -> QuestionSet {
        let questions = (0..len)
            .map(|i| {
                Question::new(
                    format!("Question {i}?"),
                    vec![
                        format!("right {i}"),
                        format!("wrong a{i}"),
                        format!("wrong b{i}"),
                        format!("wrong c{i}"),
                    ],
                    format!("right {i}"),
                )
                .unwrap()
            })
            .collect();
        QuestionSet::new(questions).unwrap()
    }

    fn started(len: usize) -> QuizSession {
        let mut session = QuizSession::with_clock(frozen_clock());
        assert!(session.start(build_set(len)));
        session
    }

    #[test]
    fn new_session_is_idle() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.total(), 0);
        assert!(session.current_question().is_none());
        assert!(session.percentage().is_none());
    }

    #[test]
    fn answering_everything_correctly_scores_full_marks() {
        let mut session = started(QUIZ_LENGTH);
        while let Some(question) = session.current_question() {
            let answer = question.answer().to_owned();
            let outcome = session.record_answer(&answer).unwrap();
            assert!(outcome.correct);
            session.advance();
        }

        assert!(session.is_complete());
        assert_eq!(session.score(), 10);
        assert_eq!(session.percentage(), Some(100));
        assert_eq!(session.current_index(), QUIZ_LENGTH);
        let summary = session.summary().unwrap();
        assert_eq!(summary.band(), ScoreBand::Outstanding);
        assert_eq!(summary.started_at(), frozen_now());
    }

    #[test]
    fn answering_everything_wrong_scores_zero() {
        let mut session = started(QUIZ_LENGTH);
        while session.current_question().is_some() {
            let outcome = session.record_answer("not a choice").unwrap();
            assert!(!outcome.correct);
            assert!(outcome.answer.starts_with("right"));
            session.advance();
        }

        assert_eq!(session.score(), 0);
        assert_eq!(session.percentage(), Some(0));
        assert_eq!(session.summary().unwrap().band(), ScoreBand::KeepPracticing);
    }

    #[test]
    fn repeated_answers_score_once() {
        let mut session = started(QUIZ_LENGTH);
        let answer = session.current_question().unwrap().answer().to_owned();

        assert!(session.record_answer(&answer).is_some());
        assert!(session.record_answer(&answer).is_none());
        assert!(session.record_answer("wrong a0").is_none());
        assert_eq!(session.score(), 1);
        assert!(session.answered_current());

        session.advance();
        assert!(!session.answered_current());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn record_choice_uses_one_based_positions() {
        let mut session = started(3);
        assert!(session.record_choice(0).is_none());
        assert!(session.record_choice(5).is_none());
        assert!(!session.answered_current());

        let outcome = session.record_choice(1).unwrap();
        assert_eq!(outcome.chosen, "right 0");
        assert!(outcome.correct);
    }

    #[test]
    fn transitions_outside_in_progress_are_ignored() {
        let mut idle = QuizSession::new();
        assert!(idle.record_answer("x").is_none());
        assert!(!idle.advance());
        assert_eq!(idle.phase(), SessionPhase::Idle);

        let mut session = started(1);
        assert!(!session.start(build_set(2)));
        assert_eq!(session.total(), 1);

        session.advance();
        assert!(session.is_complete());
        assert!(!session.advance());
        assert!(session.record_answer("right 0").is_none());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn progress_reports_one_based_position() {
        let mut session = started(4);
        assert_eq!(session.progress(), Some(Progress { position: 1, total: 4 }));
        session.advance();
        session.advance();
        let progress = session.progress().unwrap();
        assert_eq!(progress.position, 3);
        assert!((progress.fraction() - 0.75).abs() < f32::EPSILON);

        let empty = Progress { position: 0, total: 0 };
        assert!(empty.fraction().abs() < f32::EPSILON);
    }

    #[test]
    fn reset_returns_to_idle_and_drops_questions() {
        let mut session = started(QUIZ_LENGTH);
        session.record_choice(1);
        session.advance();
        session.reset();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert!(session.questions().is_none());
        assert!(session.start(build_set(2)));
        assert_eq!(session.total(), 2);
    }
}
