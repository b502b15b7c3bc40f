use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

/// Key under which the serialized snapshot lives in the local store.
pub const STATS_SNAPSHOT_KEY: &str = "studygenie_realtime_stats";

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("question {id} is marked correct but was never answered")]
    CorrectNotAnswered { id: QuestionId },

    #[error("{field} ({stored}) does not match its id set ({actual})")]
    CountMismatch {
        field: &'static str,
        stored: u32,
        actual: usize,
    },

    #[error("best score {0}% is out of range")]
    ScoreOutOfRange(u32),

    #[error("invalid {field}: {value}")]
    InvalidTime { field: &'static str, value: f64 },
}

/// Aggregate quiz statistics for the loaded question set at one point in time.
///
/// Values are only produced by [`crate::stats::StatsTracker`] or rehydrated
/// through [`QuizStatsSnapshot::from_persisted`], so the counters always agree
/// with the id sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuizStatsRecord")]
pub struct QuizStatsSnapshot {
    pub(crate) total_questions: u32,
    pub(crate) answered_count: u32,
    pub(crate) answered_question_ids: BTreeSet<QuestionId>,
    pub(crate) correct_question_ids: BTreeSet<QuestionId>,
    pub(crate) correct_answers: u32,
    pub(crate) total_time_seconds: f64,
    pub(crate) average_time_seconds: f64,
    pub(crate) best_score_percent: u8,
}

/// Plain persisted shape of a snapshot, as written to the local store.
///
/// Unknown fields from older layouts are ignored; missing ones default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizStatsRecord {
    pub total_questions: u32,
    pub answered_count: u32,
    pub answered_question_ids: BTreeSet<QuestionId>,
    pub correct_question_ids: BTreeSet<QuestionId>,
    pub correct_answers: u32,
    pub total_time_seconds: f64,
    pub average_time_seconds: f64,
    pub best_score_percent: u32,
}

impl TryFrom<QuizStatsRecord> for QuizStatsSnapshot {
    type Error = SnapshotError;

    fn try_from(record: QuizStatsRecord) -> Result<Self, Self::Error> {
        Self::from_persisted(record)
    }
}

impl From<&QuizStatsSnapshot> for QuizStatsRecord {
    fn from(snapshot: &QuizStatsSnapshot) -> Self {
        Self {
            total_questions: snapshot.total_questions,
            answered_count: snapshot.answered_count,
            answered_question_ids: snapshot.answered_question_ids.clone(),
            correct_question_ids: snapshot.correct_question_ids.clone(),
            correct_answers: snapshot.correct_answers,
            total_time_seconds: snapshot.total_time_seconds,
            average_time_seconds: snapshot.average_time_seconds,
            best_score_percent: u32::from(snapshot.best_score_percent),
        }
    }
}

impl QuizStatsSnapshot {
    /// Fresh snapshot for a newly loaded question set.
    #[must_use]
    pub fn for_question_set(total_questions: u32) -> Self {
        Self {
            total_questions,
            ..Self::default()
        }
    }

    /// Rehydrate a snapshot from the persisted record.
    ///
    /// The stored average is not trusted; it is recomputed from the totals.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the counters disagree with the id sets, a
    /// correct id was never answered, the best score exceeds 100, or a time
    /// value is negative or not finite.
    pub fn from_persisted(record: QuizStatsRecord) -> Result<Self, SnapshotError> {
        if let Some(id) = record
            .correct_question_ids
            .difference(&record.answered_question_ids)
            .next()
        {
            return Err(SnapshotError::CorrectNotAnswered { id: *id });
        }
        check_count(
            "answeredCount",
            record.answered_count,
            record.answered_question_ids.len(),
        )?;
        check_count(
            "correctAnswers",
            record.correct_answers,
            record.correct_question_ids.len(),
        )?;
        let best_score_percent = u8::try_from(record.best_score_percent)
            .ok()
            .filter(|score| *score <= 100)
            .ok_or(SnapshotError::ScoreOutOfRange(record.best_score_percent))?;
        if !record.total_time_seconds.is_finite() || record.total_time_seconds < 0.0 {
            return Err(SnapshotError::InvalidTime {
                field: "totalTimeSeconds",
                value: record.total_time_seconds,
            });
        }

        let mut snapshot = Self {
            total_questions: record.total_questions,
            answered_count: record.answered_count,
            answered_question_ids: record.answered_question_ids,
            correct_question_ids: record.correct_question_ids,
            correct_answers: record.correct_answers,
            total_time_seconds: record.total_time_seconds,
            average_time_seconds: 0.0,
            best_score_percent,
        };
        snapshot.average_time_seconds = snapshot.computed_average();
        Ok(snapshot)
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.answered_count
    }

    #[must_use]
    pub fn answered_question_ids(&self) -> &BTreeSet<QuestionId> {
        &self.answered_question_ids
    }

    #[must_use]
    pub fn correct_question_ids(&self) -> &BTreeSet<QuestionId> {
        &self.correct_question_ids
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn total_time_seconds(&self) -> f64 {
        self.total_time_seconds
    }

    #[must_use]
    pub fn average_time_seconds(&self) -> f64 {
        self.average_time_seconds
    }

    #[must_use]
    pub fn best_score_percent(&self) -> u8 {
        self.best_score_percent
    }

    /// Returns true if `id` has received at least one answer.
    #[must_use]
    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.answered_question_ids.contains(&id)
    }

    /// Returns true if the latest answer recorded for `id` was correct.
    #[must_use]
    pub fn is_correct(&self, id: QuestionId) -> bool {
        self.correct_question_ids.contains(&id)
    }

    /// Divisor for the percent-correct calculation.
    ///
    /// Prefers the declared question count, falling back to the answered count
    /// when the set size is unknown (zero).
    #[must_use]
    pub fn score_denominator(&self) -> u32 {
        if self.total_questions > 0 {
            self.total_questions
        } else {
            self.answered_count
        }
    }

    /// Percent correct right now, rounded half up and capped at 100.
    #[must_use]
    pub fn current_percent(&self) -> u8 {
        let denom = self.score_denominator();
        if denom == 0 {
            return 0;
        }
        let percent = (f64::from(self.correct_answers) / f64::from(denom) * 100.0).round();
        // Bounded to 0..=100 before the cast.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent.clamp(0.0, 100.0) as u8;
        percent
    }

    pub(crate) fn computed_average(&self) -> f64 {
        if self.answered_count == 0 {
            0.0
        } else {
            self.total_time_seconds / f64::from(self.answered_count)
        }
    }
}

fn check_count(field: &'static str, stored: u32, actual: usize) -> Result<(), SnapshotError> {
    if usize::try_from(stored).ok() == Some(actual) {
        Ok(())
    } else {
        Err(SnapshotError::CountMismatch {
            field,
            stored,
            actual,
        })
    }
}
