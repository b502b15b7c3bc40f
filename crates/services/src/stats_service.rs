use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::model::{QuestionId, QuizStatsSnapshot};
use quiz_core::stats::{StatsTracker, TrackerState};
use storage::repository::StatsSnapshotRepository;

/// Receives every snapshot the stats service produces, e.g. a stats panel.
pub trait StatsPublisher: Send + Sync {
    fn publish(&self, snapshot: &QuizStatsSnapshot);
}

impl<F> StatsPublisher for F
where
    F: Fn(&QuizStatsSnapshot) + Send + Sync,
{
    fn publish(&self, snapshot: &QuizStatsSnapshot) {
        self(snapshot);
    }
}

/// Publisher that writes the headline numbers to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPublisher;

impl StatsPublisher for TracingPublisher {
    fn publish(&self, snapshot: &QuizStatsSnapshot) {
        tracing::info!(
            correct = snapshot.correct_answers(),
            total = snapshot.total_questions(),
            answered = snapshot.answered_count(),
            average_secs = snapshot.average_time_seconds(),
            best_percent = snapshot.best_score_percent(),
            "quiz stats updated"
        );
    }
}

/// Realtime quiz statistics with best-effort caching and publishing.
///
/// The tracker held here is the source of truth for the running session. After
/// each mutation the snapshot is written to the optional store and handed to
/// the optional publisher; neither side effect can fail the call.
pub struct RealtimeStatsService {
    tracker: Mutex<StatsTracker>,
    store: Option<Arc<dyn StatsSnapshotRepository>>,
    publisher: Option<Arc<dyn StatsPublisher>>,
}

impl RealtimeStatsService {
    #[must_use]
    pub fn new(store: Option<Arc<dyn StatsSnapshotRepository>>) -> Self {
        Self {
            tracker: Mutex::new(StatsTracker::new()),
            store,
            publisher: None,
        }
    }

    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn StatsPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    // A panic mid-update cannot leave the tracker half-written, so a poisoned
    // lock still guards a valid snapshot.
    fn tracker(&self) -> MutexGuard<'_, StatsTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.tracker().state()
    }

    /// Copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> QuizStatsSnapshot {
        self.tracker().snapshot().clone()
    }

    /// Start tracking a newly loaded question set.
    pub async fn reset(&self, total_questions: u32) -> QuizStatsSnapshot {
        let snapshot = self.tracker().reset(total_questions).clone();
        tracing::debug!(total_questions, "quiz stats reset");
        self.persist_and_publish(&snapshot).await;
        snapshot
    }

    /// Record one submitted answer and return the updated snapshot.
    pub async fn record_answer(
        &self,
        question_id: Option<QuestionId>,
        was_correct: bool,
        elapsed_seconds: f64,
    ) -> QuizStatsSnapshot {
        let snapshot = {
            let mut tracker = self.tracker();
            let outcome = tracker.record_answer(question_id, was_correct, elapsed_seconds);
            tracing::debug!(
                ?question_id,
                was_correct,
                elapsed_seconds,
                first_answer = outcome.first_answer,
                change = ?outcome.change,
                current_percent = outcome.current_percent,
                "answer recorded"
            );
            tracker.snapshot().clone()
        };
        self.persist_and_publish(&snapshot).await;
        snapshot
    }

    /// Snapshot cached by a previous run, for display before a quiz loads.
    ///
    /// The cached copy never feeds back into the tracker. Read failures are
    /// logged and treated as an empty cache.
    pub async fn cached_snapshot(&self) -> Option<QuizStatsSnapshot> {
        let store = self.store.as_ref()?;
        match store.load_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable cached quiz stats");
                None
            }
        }
    }

    async fn persist_and_publish(&self, snapshot: &QuizStatsSnapshot) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_snapshot(snapshot).await {
                tracing::warn!(error = %err, "failed to cache quiz stats");
            }
        }
        if let Some(publisher) = &self.publisher {
            publisher.publish(snapshot);
        }
    }
}
