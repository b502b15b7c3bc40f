use std::sync::Arc;

use services::{QuizBackend, QuizSessionService, RealtimeStatsService};

pub trait UiApp: Send + Sync {
    fn stats(&self) -> Arc<RealtimeStatsService>;
    fn quiz(&self) -> Arc<QuizSessionService>;

    /// `None` when running offline.
    fn backend(&self) -> Option<Arc<dyn QuizBackend>>;
}

#[derive(Clone)]
pub struct AppContext {
    stats: Arc<RealtimeStatsService>,
    quiz: Arc<QuizSessionService>,
    backend: Option<Arc<dyn QuizBackend>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            stats: app.stats(),
            quiz: app.quiz(),
            backend: app.backend(),
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

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.backend.is_none()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
