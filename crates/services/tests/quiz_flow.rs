use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId, QuestionSet};
use quiz_core::time::fixed_now;
use services::{
    AnswerCheck, AppServices, Clock, Navigation, QuizApiError, QuizBackend, QuizSessionError,
};
use storage::repository::{StatsSnapshotRepository, Storage};

#[derive(Default)]
struct FakeBackend {
    quiz: Option<QuestionSet>,
    verdicts: Mutex<Vec<AnswerCheck>>,
    calls: Mutex<Vec<(QuestionId, String)>>,
}

impl FakeBackend {
    fn with_verdicts(verdicts: Vec<AnswerCheck>) -> Self {
        let mut verdicts = verdicts;
        verdicts.reverse();
        Self {
            verdicts: Mutex::new(verdicts),
            ..Self::default()
        }
    }
}

#[async_trait]
impl QuizBackend for FakeBackend {
    async fn fetch_quiz(&self) -> Result<QuestionSet, QuizApiError> {
        self.quiz
            .clone()
            .ok_or_else(|| QuizApiError::Rejected("backend down".into()))
    }

    async fn check_answer(
        &self,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<AnswerCheck, QuizApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((question_id, answer.to_owned()));
        self.verdicts
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| QuizApiError::Rejected("no verdict queued".into()))
    }
}

fn judged(correct: Option<bool>) -> AnswerCheck {
    AnswerCheck {
        success: true,
        correct,
        correct_answer: Some("A".into()),
        explanation: Some("The correct answer is A".into()),
        error: None,
    }
}

fn unkeyed_question(text: &str) -> Question {
    Question {
        question: text.into(),
        options: [("A".to_string(), "yes".to_string()), ("B".to_string(), "no".to_string())]
            .into_iter()
            .collect(),
        answer: None,
        subject: None,
        kind: None,
    }
}

fn services() -> (Storage, AppServices) {
    let storage = Storage::in_memory();
    let app = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), None, None);
    (storage, app)
}

#[tokio::test]
async fn retries_follow_latest_answer_and_persist() {
    let (storage, app) = services();
    let quiz = app.quiz();

    let mut session = quiz.start(QuestionSet::sample()).await;

    let feedback = quiz.submit(&session, "A", None).await.unwrap();
    assert!(feedback.correct);
    assert_eq!(feedback.stats.best_score_percent(), 50);

    assert_eq!(quiz.next(&mut session), Navigation::Moved(1));
    let feedback = quiz.submit(&session, "C", None).await.unwrap();
    assert!(!feedback.correct);
    assert!(feedback.is_last);
    assert_eq!(feedback.expected_answer.as_deref(), Some("A"));
    assert_eq!(feedback.stats.answered_count(), 2);
    assert_eq!(feedback.stats.correct_answers(), 1);

    let feedback = quiz.submit(&session, "A", None).await.unwrap();
    assert_eq!(feedback.stats.correct_answers(), 2);
    assert_eq!(feedback.stats.best_score_percent(), 100);

    assert_eq!(quiz.previous(&mut session), Navigation::Moved(0));
    let feedback = quiz.submit(&session, "D", None).await.unwrap();
    assert_eq!(feedback.stats.correct_answers(), 1);
    assert_eq!(feedback.stats.best_score_percent(), 100);

    let cached = storage.stats.load_snapshot().await.unwrap().unwrap();
    assert_eq!(cached, feedback.stats);
}

#[tokio::test]
async fn backend_verdict_wins_and_missing_flag_falls_back() {
    let (_storage, app) = services();
    let quiz = app.quiz();
    let backend = FakeBackend::with_verdicts(vec![judged(Some(false)), judged(None)]);

    let session = quiz.start(QuestionSet::sample()).await;

    // The local key says "A" is right, but the backend's judgment is final.
    let feedback = quiz.check_and_submit(&session, &backend, "A").await.unwrap();
    assert!(!feedback.correct);
    assert_eq!(
        feedback.explanation.as_deref(),
        Some("The correct answer is A")
    );

    let feedback = quiz.check_and_submit(&session, &backend, "A").await.unwrap();
    assert!(feedback.correct);
    assert_eq!(feedback.stats.correct_answers(), 1);
    assert_eq!(feedback.stats.answered_count(), 1);

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls.as_slice(), &[
        (QuestionId::new(0), "A".to_string()),
        (QuestionId::new(0), "A".to_string()),
    ]);
}

#[tokio::test]
async fn backend_supplies_expected_answer_when_not_cached_locally() {
    let (_storage, app) = services();
    let quiz = app.quiz();
    let backend = FakeBackend::with_verdicts(vec![judged(Some(false))]);

    let session = quiz
        .start(QuestionSet::new(vec![unkeyed_question("Q1")]))
        .await;
    let feedback = quiz.check_and_submit(&session, &backend, "B").await.unwrap();
    assert_eq!(feedback.expected_answer.as_deref(), Some("A"));
}

#[tokio::test]
async fn failed_checks_record_nothing() {
    let (_storage, app) = services();
    let quiz = app.quiz();
    let rejected = AnswerCheck {
        success: false,
        error: Some("Question not found".into()),
        ..AnswerCheck::default()
    };
    let backend = FakeBackend::with_verdicts(vec![rejected]);

    let session = quiz.start(QuestionSet::sample()).await;

    let err = quiz
        .check_and_submit(&session, &backend, "A")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QuizSessionError::Backend(QuizApiError::Rejected(ref msg)) if msg == "Question not found"
    ));

    let err = quiz
        .check_and_submit(&session, &backend, "A")
        .await
        .unwrap_err();
    assert!(matches!(err, QuizSessionError::Backend(_)));

    let err = quiz.submit(&session, "", None).await.unwrap_err();
    assert!(matches!(err, QuizSessionError::EmptyAnswer));

    let stats = app.stats().snapshot();
    assert_eq!(stats.answered_count(), 0);
    assert_eq!(stats.total_questions(), 2);
}

#[tokio::test]
async fn unreachable_backend_loads_sample_quiz() {
    let (_storage, app) = services();
    let backend = FakeBackend::default();

    let session = app.quiz().start_from_backend(&backend).await;
    assert_eq!(session.total(), 2);
    assert_eq!(app.stats().snapshot().total_questions(), 2);
}

#[tokio::test]
async fn backend_quiz_resets_stats_to_its_size() {
    let (_storage, app) = services();
    let quiz = app.quiz();

    let first = quiz.start(QuestionSet::sample()).await;
    quiz.submit(&first, "A", None).await.unwrap();
    assert_eq!(app.stats().snapshot().best_score_percent(), 50);

    let backend = FakeBackend {
        quiz: Some(QuestionSet::new(vec![
            unkeyed_question("Q1"),
            unkeyed_question("Q2"),
            unkeyed_question("Q3"),
        ])),
        ..FakeBackend::default()
    };
    let session = quiz.start_from_backend(&backend).await;
    assert_eq!(session.total(), 3);

    let stats = app.stats().snapshot();
    assert_eq!(stats.total_questions(), 3);
    assert_eq!(stats.answered_count(), 0);
    assert_eq!(stats.best_score_percent(), 0);

    // Without a local key or a backend verdict, the answer counts as wrong.
    let feedback = quiz.submit(&session, "A", None).await.unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.stats.answered_count(), 1);
}

#[tokio::test]
async fn stats_survive_in_cache_for_next_launch() {
    let storage = Storage::in_memory();
    let first = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), None, None);
    let session = first.quiz().start(QuestionSet::sample()).await;
    first.quiz().submit(&session, "A", None).await.unwrap();

    let second = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), None, None);
    let cached = second.stats().cached_snapshot().await.unwrap();
    assert_eq!(cached.correct_answers(), 1);
    assert_eq!(second.stats().snapshot().correct_answers(), 0);
}

#[test]
fn app_services_is_cloneable_and_shareable() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<AppServices>();
    let _ = Arc::new(services().1);
}
