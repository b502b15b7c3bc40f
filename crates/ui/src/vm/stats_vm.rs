use quiz_core::model::QuizStatsSnapshot;

/// Display strings for the realtime stats panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub correct_str: String,
    pub answered_str: String,
    pub average_time_str: String,
    pub best_score_str: String,
}

impl From<&QuizStatsSnapshot> for StatsVm {
    fn from(snapshot: &QuizStatsSnapshot) -> Self {
        Self {
            correct_str: format!(
                "{}/{}",
                snapshot.correct_answers(),
                snapshot.total_questions()
            ),
            answered_str: snapshot.answered_count().to_string(),
            average_time_str: format_seconds(snapshot.average_time_seconds()),
            best_score_str: format!("{}%", snapshot.best_score_percent()),
        }
    }
}

impl Default for StatsVm {
    fn default() -> Self {
        Self::from(&QuizStatsSnapshot::default())
    }
}

/// Whole seconds, rounded half up: `7.5` renders as `"8s"`.
#[must_use]
pub fn format_seconds(seconds: f64) -> String {
    let rounded = if seconds.is_finite() {
        (seconds + 0.5).floor().max(0.0)
    } else {
        0.0
    };
    // Non-negative and integral after rounding.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rounded as u64;
    format!("{whole}s")
}
