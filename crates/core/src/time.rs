use chrono::{DateTime, Duration, Utc};

use crate::answer::clamp_elapsed;

/// Source of "now" for question timing, fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Measures how long the learner spends on the displayed question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionTimer {
    started_at: Option<DateTime<Utc>>,
}

impl QuestionTimer {
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Seconds since `start`, never negative; zero if the timer never started.
    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let millis = (now - started_at).num_milliseconds();
        // Millisecond counts for a single question stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let seconds = millis as f64 / 1000.0;
        clamp_elapsed(seconds)
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_measures_fixed_clock_advance() {
        let mut clock = fixed_clock();
        let mut timer = QuestionTimer::default();
        timer.start(clock.now());
        clock.advance(Duration::milliseconds(2_500));
        assert!((timer.elapsed_seconds(clock.now()) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn timer_never_started_reports_zero() {
        let timer = QuestionTimer::default();
        assert_eq!(timer.elapsed_seconds(fixed_now()), 0.0);
    }

    #[test]
    fn timer_clamps_backwards_clock() {
        let mut timer = QuestionTimer::default();
        timer.start(fixed_now());
        let earlier = fixed_now() - Duration::seconds(5);
        assert_eq!(timer.elapsed_seconds(earlier), 0.0);
    }

    #[test]
    fn system_clock_does_not_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(1));
        assert!(matches!(clock, Clock::System));
    }
}
