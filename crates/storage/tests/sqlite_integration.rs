use quiz_core::model::{QuestionId, QuizStatsSnapshot};
use quiz_core::stats::StatsTracker;
use storage::repository::{StatsSnapshotRepository, Storage};
use storage::sqlite::SqliteRepository;

fn snapshot_after(events: &[(u64, bool, f64)], total: u32) -> QuizStatsSnapshot {
    let mut tracker = StatsTracker::new();
    tracker.reset(total);
    for (id, correct, elapsed) in events {
        tracker.record_answer(Some(QuestionId::new(*id)), *correct, *elapsed);
    }
    tracker.snapshot().clone()
}

#[tokio::test]
async fn sqlite_roundtrip_keeps_snapshot() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_stats_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_snapshot().await.unwrap().is_none());

    let snapshot = snapshot_after(&[(0, true, 10.0), (1, false, 5.0)], 2);
    repo.save_snapshot(&snapshot).await.unwrap();

    let loaded = repo.load_snapshot().await.unwrap().expect("saved snapshot");
    assert_eq!(loaded.answered_count(), 2);
    assert_eq!(loaded.correct_answers(), 1);
    assert_eq!(loaded.best_score_percent(), 50);
    assert!(loaded.is_correct(QuestionId::new(0)));
}

#[tokio::test]
async fn sqlite_save_overwrites_single_entry() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_stats_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = snapshot_after(&[(0, true, 3.0)], 4);
    let second = snapshot_after(&[], 9);
    repo.save_snapshot(&first).await.unwrap();
    repo.save_snapshot(&second).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);

    let loaded = repo.load_snapshot().await.unwrap().unwrap();
    assert_eq!(loaded.total_questions(), 9);
    assert_eq!(loaded.answered_count(), 0);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_stats_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_sqlite_wires_stats_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_stats_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    let snapshot = snapshot_after(&[(2, true, 1.0)], 3);
    storage.stats.save_snapshot(&snapshot).await.unwrap();
    assert_eq!(storage.stats.load_snapshot().await.unwrap(), Some(snapshot));
}
