use chrono::{DateTime, Utc};
use quiz_core::QuestionTimer;
use quiz_core::answer::resolve_correctness;
use quiz_core::model::{Question, QuestionId, QuestionSet};

use crate::error::QuizSessionError;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved(usize),
    AtStart,
    AtEnd,
}

/// An answer captured at submission time, awaiting a judgment.
///
/// Elapsed time is measured when the learner submits, before any backend
/// round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnswer {
    pub question_id: QuestionId,
    pub choice: String,
    pub expected: Option<String>,
    pub elapsed_seconds: f64,
}

impl PendingAnswer {
    /// Final correctness, preferring the backend verdict over the local key.
    #[must_use]
    pub fn resolve(&self, server_verdict: Option<bool>) -> bool {
        resolve_correctness(server_verdict, &self.choice, self.expected.as_deref())
    }
}

/// In-memory walk through a loaded question set.
///
/// Timestamps come from the services layer clock to keep timing deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    questions: QuestionSet,
    current: usize,
    timer: QuestionTimer,
}

impl QuizSession {
    /// Open the set at its first question and start timing it.
    #[must_use]
    pub fn new(questions: QuestionSet, now: DateTime<Utc>) -> Self {
        let mut timer = QuestionTimer::default();
        if !questions.is_empty() {
            timer.start(now);
        }
        Self {
            questions,
            current: 0,
            timer,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        self.timer.elapsed_seconds(now)
    }

    /// Show the next question, restarting the timer.
    pub fn next(&mut self, now: DateTime<Utc>) -> Navigation {
        if self.is_last() {
            return Navigation::AtEnd;
        }
        self.show(self.current + 1, now)
    }

    /// Show the previous question, restarting the timer.
    pub fn previous(&mut self, now: DateTime<Utc>) -> Navigation {
        if self.current == 0 {
            return Navigation::AtStart;
        }
        self.show(self.current - 1, now)
    }

    fn show(&mut self, index: usize, now: DateTime<Utc>) -> Navigation {
        self.current = index;
        self.timer.start(now);
        Navigation::Moved(index)
    }

    /// Capture the learner's choice for the displayed question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::EmptyAnswer` for a blank choice and
    /// `QuizSessionError::NoQuestion` when nothing is displayed.
    pub fn begin_submission(
        &self,
        choice: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingAnswer, QuizSessionError> {
        let choice = choice.trim();
        if choice.is_empty() {
            return Err(QuizSessionError::EmptyAnswer);
        }
        let question = self.current_question().ok_or(QuizSessionError::NoQuestion)?;

        Ok(PendingAnswer {
            question_id: QuestionId::from_index(self.current),
            choice: choice.to_owned(),
            expected: question.expected_answer().map(str::to_owned),
            elapsed_seconds: self.timer.elapsed_seconds(now),
        })
    }
}
