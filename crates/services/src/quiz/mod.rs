mod session;
mod workflow;

pub use crate::error::QuizSessionError;
pub use session::{Navigation, PendingAnswer, QuizSession};
pub use workflow::{AnswerFeedback, QuizSessionService};
