use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::quiz::QuizSessionService;
use crate::quiz_api::{QuizApiClient, QuizApiConfig, QuizBackend};
use crate::stats_service::{RealtimeStatsService, StatsPublisher};

/// Assembles app-facing services from a storage backend.
#[derive(Clone)]
pub struct AppServices {
    stats: Arc<RealtimeStatsService>,
    quiz: Arc<QuizSessionService>,
    backend: Option<Arc<dyn QuizBackend>>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// `api` is `None` for offline runs, which use the built-in sample quiz.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        api: Option<QuizApiConfig>,
        publisher: Option<Arc<dyn StatsPublisher>>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let backend = api.map(|config| Arc::new(QuizApiClient::new(config)) as Arc<dyn QuizBackend>);
        Ok(Self::from_storage(&storage, clock, backend, publisher))
    }

    /// Wire services over an existing storage and optional backend.
    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        backend: Option<Arc<dyn QuizBackend>>,
        publisher: Option<Arc<dyn StatsPublisher>>,
    ) -> Self {
        let mut stats = RealtimeStatsService::new(Some(Arc::clone(&storage.stats)));
        if let Some(publisher) = publisher {
            stats = stats.with_publisher(publisher);
        }
        let stats = Arc::new(stats);
        let quiz = Arc::new(QuizSessionService::new(clock, Arc::clone(&stats)));

        Self {
            stats,
            quiz,
            backend,
        }
    }

    #[must_use]
    pub fn stats(&self) -> Arc<RealtimeStatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn backend(&self) -> Option<Arc<dyn QuizBackend>> {
        self.backend.clone()
    }
}
