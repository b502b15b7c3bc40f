mod ids;
mod question;
mod snapshot;

pub use ids::{ParseIdError, QuestionId};
pub use question::{Question, QuestionSet};
pub use snapshot::{QuizStatsRecord, QuizStatsSnapshot, STATS_SNAPSHOT_KEY, SnapshotError};
