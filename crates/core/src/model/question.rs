use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

const DEFAULT_SUBJECT: &str = "General";
const DEFAULT_KIND: &str = "MCQ";

/// A single multiple-choice question as served by the quiz backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    /// Option letter (`"A"`, `"B"`, ...) to option text.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Expected option letter, when the backend shares it.
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Question {
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_KIND)
    }

    #[must_use]
    pub fn expected_answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}

/// Ordered set of questions making up one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Built-in quiz shown when the backend cannot be reached.
    #[must_use]
    pub fn sample() -> Self {
        let physics = |question: &str, options: [&str; 4]| Question {
            question: question.to_owned(),
            options: ["A", "B", "C", "D"]
                .into_iter()
                .zip(options)
                .map(|(key, text)| (key.to_owned(), text.to_owned()))
                .collect(),
            answer: Some("A".to_owned()),
            subject: Some("Physics".to_owned()),
            kind: Some(DEFAULT_KIND.to_owned()),
        };

        Self::new(vec![
            physics(
                "According to Newton's Second Law, which equation is correct?",
                [
                    "Force = Mass × Acceleration",
                    "Mass = Force × Acceleration",
                    "Acceleration = Force × Mass",
                    "Force = Mass ÷ Acceleration",
                ],
            ),
            physics(
                "What is inertia?",
                [
                    "Resistance to change in motion",
                    "A type of force",
                    "Rate of change of velocity",
                    "Energy stored in motion",
                ],
            ),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question count as used for the stats denominator.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn get_by_id(&self, id: QuestionId) -> Option<&Question> {
        usize::try_from(id.value())
            .ok()
            .and_then(|index| self.questions.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
