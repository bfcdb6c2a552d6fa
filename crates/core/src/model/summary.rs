use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("a quiz needs at least one question")]
    EmptyQuiz,

    #[error("score ({score}) exceeds question count ({total})")]
    ScoreExceedsTotal { score: usize, total: usize },
}

/// `round(100 * score / total)`, rounding halves up. Zero questions yield 0.
#[must_use]
pub fn percentage(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (200 * score + total) / (2 * total);
    u8::try_from(pct.min(100)).unwrap_or(100)
}

/// Result message band shown with the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Outstanding,
    Great,
    Good,
    KeepPracticing,
}

impl ScoreBand {
    #[must_use]
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => Self::Outstanding,
            70..=89 => Self::Great,
            50..=69 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding!",
            Self::Great => "Great job!",
            Self::Good => "Good effort!",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

/// Final tally handed to the presentation layer when a quiz completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    score: usize,
    total: usize,
    percentage: u8,
    band: ScoreBand,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl ScoreSummary {
    /// # Errors
    ///
    /// Returns `ScoreSummaryError` for an empty quiz, a score above the
    /// question count, or a completion time before the start time.
    pub fn new(
        score: usize,
        total: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ScoreSummaryError> {
        if total == 0 {
            return Err(ScoreSummaryError::EmptyQuiz);
        }
        if score > total {
            return Err(ScoreSummaryError::ScoreExceedsTotal { score, total });
        }
        if completed_at < started_at {
            return Err(ScoreSummaryError::InvalidTimeRange);
        }

        let percentage = percentage(score, total);
        Ok(Self {
            score,
            total,
            percentage,
            band: ScoreBand::from_percentage(percentage),
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        self.band
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
