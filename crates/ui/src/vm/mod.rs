mod quiz_vm;
mod stats_vm;

pub use quiz_vm::{FeedbackVm, OptionVm, QuestionVm, QuizIntent, QuizVm, start_quiz};
pub use stats_vm::{StatsVm, format_seconds};
