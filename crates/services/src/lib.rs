#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod quiz_api;
pub mod stats_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizApiError, QuizSessionError};
pub use quiz::{AnswerFeedback, Navigation, PendingAnswer, QuizSession, QuizSessionService};
pub use quiz_api::{AnswerCheck, QuizApiClient, QuizApiConfig, QuizBackend};
pub use stats_service::{RealtimeStatsService, StatsPublisher, TracingPublisher};
