//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Get the elapsed time between two timestamps in seconds.
///
/// Returns `None` if there is no previous timestamp, or if the clock has not
/// moved forwards since it was taken.
pub fn elapsed_since(prev_s: Option<f64>, now_s: f64) -> Option<f64> {
    match prev_s {
        Some(p) => {
            let dt = now_s - p;
            if dt.is_finite() && dt > 0.0 {
                Some(dt)
            } else {
                None
            }
        }
        None => None,
    }
}
