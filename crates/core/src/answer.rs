/// Decide whether a submitted choice is correct.
///
/// The backend's judgment wins when present. Otherwise the choice is compared
/// with the locally cached expected answer; with neither available the answer
/// counts as incorrect.
#[must_use]
pub fn resolve_correctness(
    server_verdict: Option<bool>,
    submitted: &str,
    expected: Option<&str>,
) -> bool {
    match server_verdict {
        Some(verdict) => verdict,
        None => expected.is_some_and(|expected| expected == submitted),
    }
}

/// Normalize an elapsed time to a finite, non-negative number of seconds.
#[must_use]
pub fn clamp_elapsed(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
