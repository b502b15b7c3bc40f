//! Real-time quiz statistics.
//!
//! [`StatsTracker`] is the pure state machine behind the dashboard's stats
//! panel. It owns a [`QuizStatsSnapshot`] and applies answer events with a
//! latest-answer-wins policy: a question may be answered several times, and
//! only its most recent judgment counts toward correctness. Side effects
//! (persisting, publishing) belong to the services layer.

use crate::answer::clamp_elapsed;
use crate::model::{QuestionId, QuizStatsSnapshot};

/// Externally visible lifecycle of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No question set has been loaded yet.
    Uninitialized,
    /// A question set is loaded and answers are being recorded.
    Active,
}

/// Change in correctness caused by a single answer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectnessChange {
    Unchanged,
    BecameCorrect,
    BecameIncorrect,
}

/// What one `record_answer` call did, for logging and feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub first_answer: bool,
    pub change: CorrectnessChange,
    pub current_percent: u8,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    state: TrackerState,
    snapshot: QuizStatsSnapshot,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    /// A tracker in the `Uninitialized` state with an all-zero snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TrackerState::Uninitialized,
            snapshot: QuizStatsSnapshot::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Start tracking a newly loaded question set.
    ///
    /// Every counter, both id sets and the best score are cleared.
    pub fn reset(&mut self, total_questions: u32) -> &QuizStatsSnapshot {
        self.snapshot = QuizStatsSnapshot::for_question_set(total_questions);
        self.state = TrackerState::Active;
        &self.snapshot
    }

    /// Apply one answer event.
    ///
    /// An event without a question id only contributes its time and a fresh
    /// percent evaluation. Calling this before any `reset` behaves as if
    /// `reset(0)` had been called first.
    pub fn record_answer(
        &mut self,
        question_id: Option<QuestionId>,
        was_correct: bool,
        elapsed_seconds: f64,
    ) -> AnswerOutcome {
        if self.state == TrackerState::Uninitialized {
            self.reset(0);
        }

        let (first_answer, change) = match question_id {
            Some(id) => self.apply_judgment(id, was_correct),
            None => (false, CorrectnessChange::Unchanged),
        };

        let snap = &mut self.snapshot;
        snap.total_time_seconds += clamp_elapsed(elapsed_seconds);
        snap.average_time_seconds = snap.computed_average();

        let current_percent = snap.current_percent();
        snap.best_score_percent = snap.best_score_percent.max(current_percent);

        AnswerOutcome {
            first_answer,
            change,
            current_percent,
        }
    }

    fn apply_judgment(&mut self, id: QuestionId, was_correct: bool) -> (bool, CorrectnessChange) {
        let snap = &mut self.snapshot;

        let first_answer = snap.answered_question_ids.insert(id);
        if first_answer {
            snap.answered_count = snap.answered_count.saturating_add(1);
        }

        let was_previously_correct = snap.correct_question_ids.contains(&id);
        let change = match (was_correct, was_previously_correct) {
            (true, false) => {
                snap.correct_question_ids.insert(id);
                snap.correct_answers = snap.correct_answers.saturating_add(1);
                CorrectnessChange::BecameCorrect
            }
            (false, true) => {
                snap.correct_question_ids.remove(&id);
                snap.correct_answers = snap.correct_answers.saturating_sub(1);
                CorrectnessChange::BecameIncorrect
            }
            _ => CorrectnessChange::Unchanged,
        };

        (first_answer, change)
    }

    /// Current snapshot, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> &QuizStatsSnapshot {
        &self.snapshot
    }
}
