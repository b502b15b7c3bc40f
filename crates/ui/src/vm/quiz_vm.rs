use quiz_core::model::{Question, QuizStatsSnapshot};
use services::{
    AnswerFeedback, Navigation, QuizBackend, QuizSession, QuizSessionError, QuizSessionService,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    Submit,
    Next,
    Previous,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: String,
    pub text: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub counter: String,
    pub subject: String,
    pub kind: String,
    pub text: String,
    pub options: Vec<OptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub choice: String,
    pub expected: Option<String>,
    pub explanation: Option<String>,
}

impl FeedbackVm {
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.correct {
            "Correct! 🎉"
        } else {
            "Incorrect! Try again."
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "feedback correct"
        } else {
            "feedback incorrect"
        }
    }

    fn option_class(&self, letter: &str) -> &'static str {
        if self.expected.as_deref() == Some(letter) || (self.correct && self.choice == letter) {
            "option correct-answer"
        } else if !self.correct && self.choice == letter {
            "option incorrect-answer"
        } else {
            "option"
        }
    }
}

impl From<&AnswerFeedback> for FeedbackVm {
    fn from(feedback: &AnswerFeedback) -> Self {
        Self {
            correct: feedback.correct,
            choice: feedback.choice.clone(),
            expected: feedback.expected_answer.clone(),
            explanation: feedback.explanation.clone(),
        }
    }
}

/// Quiz page state: the running session plus whatever the learner last saw.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    session: QuizSession,
    selected: Option<String>,
    feedback: Option<FeedbackVm>,
    notice: Option<String>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            selected: None,
            feedback: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&FeedbackVm> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        let question = self.session.current_question()?;
        Some(self.map_question(question))
    }

    fn map_question(&self, question: &Question) -> QuestionVm {
        let options = question
            .options
            .iter()
            .map(|(letter, text)| OptionVm {
                letter: letter.clone(),
                text: text.clone(),
                class: self.option_class(letter),
            })
            .collect();

        QuestionVm {
            counter: format!(
                "Question {} of {}",
                self.session.current_index() + 1,
                self.session.total()
            ),
            subject: question.subject().to_owned(),
            kind: question.kind().to_owned(),
            text: question.question.clone(),
            options,
        }
    }

    fn option_class(&self, letter: &str) -> &'static str {
        if let Some(feedback) = &self.feedback {
            return feedback.option_class(letter);
        }
        if self.selected.as_deref() == Some(letter) {
            "option selected"
        } else {
            "option"
        }
    }

    /// Picking another option clears the previous judgment so it can be retried.
    pub fn select(&mut self, letter: String) {
        self.selected = Some(letter);
        self.feedback = None;
        self.notice = None;
    }

    pub fn next(&mut self, quiz: &QuizSessionService) {
        let moved = quiz.next(&mut self.session);
        self.after_navigation(moved);
    }

    pub fn previous(&mut self, quiz: &QuizSessionService) {
        let moved = quiz.previous(&mut self.session);
        self.after_navigation(moved);
    }

    fn after_navigation(&mut self, moved: Navigation) {
        match moved {
            Navigation::Moved(_) => {
                self.selected = None;
                self.feedback = None;
                self.notice = None;
            }
            Navigation::AtEnd => self.notice = Some("This is the last question!".into()),
            Navigation::AtStart => self.notice = Some("This is the first question!".into()),
        }
    }

    /// Judge the selected option, asking the backend when one is configured.
    ///
    /// Returns the refreshed stats when the answer was recorded.
    pub async fn submit(
        &mut self,
        quiz: &QuizSessionService,
        backend: Option<&dyn QuizBackend>,
    ) -> Option<QuizStatsSnapshot> {
        let choice = self.selected.clone().unwrap_or_default();
        let result = match backend {
            Some(backend) => quiz.check_and_submit(&self.session, backend, &choice).await,
            None => quiz.submit(&self.session, &choice, None).await,
        };

        match result {
            Ok(feedback) => {
                self.feedback = Some(FeedbackVm::from(&feedback));
                self.notice = None;
                Some(feedback.stats)
            }
            Err(err) => {
                self.notice = Some(submit_error_message(&err).to_owned());
                None
            }
        }
    }
}

fn submit_error_message(err: &QuizSessionError) -> &'static str {
    match err {
        QuizSessionError::EmptyAnswer => "Please select an answer",
        QuizSessionError::NoQuestion => "No question to answer.",
        _ => "Failed to check answer. Please try again.",
    }
}

/// Load the backend quiz, or the built-in one when offline.
pub async fn start_quiz(quiz: &QuizSessionService, backend: Option<&dyn QuizBackend>) -> QuizVm {
    let session = match backend {
        Some(backend) => quiz.start_from_backend(backend).await,
        None => quiz.start(quiz_core::model::QuestionSet::sample()).await,
    };
    QuizVm::new(session)
}
