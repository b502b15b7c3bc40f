use std::env;

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId, QuestionSet};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::QuizApiError;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizApiConfig {
    pub base_url: String,
}

impl QuizApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("STUDYGENIE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

/// Backend judgment for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AnswerCheck {
    #[serde(default)]
    pub success: bool,
    /// Absent when the backend could not judge; callers fall back to the local key.
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response contract of the quiz backend.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Fetch the current question set.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` on transport failures, non-success statuses, or
    /// a payload flagged as unsuccessful.
    async fn fetch_quiz(&self) -> Result<QuestionSet, QuizApiError>;

    /// Ask the backend to judge `answer` for `question_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` on transport failures or non-success statuses.
    async fn check_answer(
        &self,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<AnswerCheck, QuizApiError>;
}

#[derive(Clone)]
pub struct QuizApiClient {
    client: Client,
    config: QuizApiConfig,
}

impl QuizApiClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuizApiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: QuizApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &QuizApiConfig {
        &self.config
    }
}

#[async_trait]
impl QuizBackend for QuizApiClient {
    async fn fetch_quiz(&self) -> Result<QuestionSet, QuizApiError> {
        let response = self.client.get(self.config.endpoint("quiz")).send().await?;
        if !response.status().is_success() {
            return Err(QuizApiError::HttpStatus(response.status()));
        }

        let body: QuizResponse = response.json().await?;
        if !body.success {
            return Err(QuizApiError::Rejected(
                body.error.unwrap_or_else(|| "quiz unavailable".into()),
            ));
        }
        Ok(QuestionSet::new(body.questions))
    }

    async fn check_answer(
        &self,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<AnswerCheck, QuizApiError> {
        let payload = CheckAnswerRequest {
            question_id: question_id.value(),
            answer,
        };
        let response = self
            .client
            .post(self.config.endpoint("quiz/check-answer"))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuizApiError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct CheckAnswerRequest<'a> {
    question_id: u64,
    answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuizResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    error: Option<String>,
}
