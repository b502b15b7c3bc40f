use std::sync::Arc;

use quiz_core::model::{QuestionId, QuestionSet, QuizStatsSnapshot};

use super::session::{Navigation, PendingAnswer, QuizSession};
use crate::Clock;
use crate::error::{QuizApiError, QuizSessionError};
use crate::quiz_api::QuizBackend;
use crate::stats_service::RealtimeStatsService;

/// What the learner sees after submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub choice: String,
    pub correct: bool,
    pub expected_answer: Option<String>,
    pub explanation: Option<String>,
    pub is_last: bool,
    pub stats: QuizStatsSnapshot,
}

/// Orchestrates loading quizzes and submitting answers into the stats tracker.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    stats: Arc<RealtimeStatsService>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(clock: Clock, stats: Arc<RealtimeStatsService>) -> Self {
        Self { clock, stats }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<RealtimeStatsService> {
        Arc::clone(&self.stats)
    }

    /// Open a question set and reset the stats to its size.
    pub async fn start(&self, questions: QuestionSet) -> QuizSession {
        self.stats.reset(questions.total_questions()).await;
        QuizSession::new(questions, self.clock.now())
    }

    /// Load the backend's quiz, falling back to the built-in sample set when
    /// the backend is unreachable or serves no questions.
    pub async fn start_from_backend(&self, backend: &dyn QuizBackend) -> QuizSession {
        let questions = match backend.fetch_quiz().await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                tracing::info!("backend served an empty quiz; using sample questions");
                QuestionSet::sample()
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load quiz; using sample questions");
                QuestionSet::sample()
            }
        };
        self.start(questions).await
    }

    pub fn next(&self, session: &mut QuizSession) -> Navigation {
        session.next(self.clock.now())
    }

    pub fn previous(&self, session: &mut QuizSession) -> Navigation {
        session.previous(self.clock.now())
    }

    /// Submit a choice judged locally, or by a verdict the caller already has.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError` for a blank choice or when no question is shown.
    pub async fn submit(
        &self,
        session: &QuizSession,
        choice: &str,
        server_verdict: Option<bool>,
    ) -> Result<AnswerFeedback, QuizSessionError> {
        let pending = session.begin_submission(choice, self.clock.now())?;
        let correct = pending.resolve(server_verdict);
        Ok(self.record(session, pending, correct, None).await)
    }

    /// Ask the backend to judge a choice, then record it.
    ///
    /// Nothing is recorded when the request fails or the backend reports
    /// `success: false`.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError` for invalid input or backend failures.
    pub async fn check_and_submit(
        &self,
        session: &QuizSession,
        backend: &dyn QuizBackend,
        choice: &str,
    ) -> Result<AnswerFeedback, QuizSessionError> {
        let mut pending = session.begin_submission(choice, self.clock.now())?;
        let check = backend
            .check_answer(pending.question_id, &pending.choice)
            .await?;
        if !check.success {
            return Err(QuizApiError::Rejected(
                check.error.unwrap_or_else(|| "answer check failed".into()),
            )
            .into());
        }

        let correct = pending.resolve(check.correct);
        if pending.expected.is_none() {
            pending.expected = check.correct_answer;
        }
        Ok(self.record(session, pending, correct, check.explanation).await)
    }

    async fn record(
        &self,
        session: &QuizSession,
        pending: PendingAnswer,
        correct: bool,
        explanation: Option<String>,
    ) -> AnswerFeedback {
        let stats = self
            .stats
            .record_answer(Some(pending.question_id), correct, pending.elapsed_seconds)
            .await;

        AnswerFeedback {
            question_id: pending.question_id,
            choice: pending.choice,
            correct,
            expected_answer: pending.expected,
            explanation,
            is_last: session.is_last(),
            stats,
        }
    }
}
