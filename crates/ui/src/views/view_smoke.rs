use quiz_core::model::{QuestionId, QuestionSet};
use storage::repository::Storage;

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness};

async fn settle(harness: &mut ViewHarness) -> String {
    harness.rebuild();
    for _ in 0..5 {
        harness.drive_async().await;
    }
    harness.render()
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_cached_stats_before_a_quiz_starts() {
    let storage = Storage::in_memory();
    let previous = services::AppServices::from_storage(
        &storage,
        services::Clock::fixed(quiz_core::time::fixed_now()),
        None,
        None,
    );
    previous.stats().reset(2).await;
    previous
        .stats()
        .record_answer(Some(QuestionId::new(0)), true, 12.0)
        .await;

    let mut harness = setup_view_harness(ViewKind::Dashboard, &storage);
    let html = settle(&mut harness).await;

    assert!(html.contains("1/2"), "missing correct count in {html}");
    assert!(html.contains("12s"), "missing average time in {html}");
    assert!(html.contains("50%"), "missing best score in {html}");
    assert!(html.contains("From your last session"), "missing cache note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_shows_live_stats_once_active() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness(ViewKind::Dashboard, &storage);
    let quiz = harness.services.quiz();
    let session = quiz.start(QuestionSet::sample()).await;
    quiz.submit(&session, "B", None).await.unwrap();

    let html = settle(&mut harness).await;
    assert!(html.contains("0/2"), "missing correct count in {html}");
    assert!(!html.contains("From your last session"), "unexpected cache note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_without_history_shows_zeros() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness(ViewKind::Dashboard, &storage);
    let html = settle(&mut harness).await;

    assert!(html.contains("0/0"), "missing empty stats in {html}");
    assert!(html.contains("0s"), "missing zero time in {html}");
    assert!(html.contains("Offline mode"), "missing offline note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_loads_sample_questions_offline() {
    let storage = Storage::in_memory();
    let mut harness = setup_view_harness(ViewKind::Quiz, &storage);
    let html = settle(&mut harness).await;

    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
    assert!(html.contains("Physics"), "missing subject in {html}");
    assert!(html.contains("0/2"), "missing reset stats in {html}");
    assert_eq!(harness.services.stats().snapshot().total_questions(), 2);
}
