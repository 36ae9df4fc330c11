//! Tracking status transitions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::Params;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Tracking status of the ball.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TrackStatus {
    /// No usable target, nothing is commanded.
    NotFound,

    /// The ball was seen recently but not this cycle.
    Waiting,

    /// There is a valid detection this cycle.
    Found,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Result of a single transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Transition {
    /// The new tracking status
    pub status: TrackStatus,

    /// The new number of consecutive cycles without a detection
    pub not_found_count: u64,

    /// True if the ball has been missing for longer than the not found threshold. The count has
    /// been reset when this is set.
    pub search_triggered: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TrackStatus {
    fn default() -> Self {
        TrackStatus::NotFound
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the tracking status for this cycle.
///
/// Only called while tracking. `prev_status` is the status resolved on the previous cycle and
/// `not_found_count` the count before this cycle.
pub fn transition(
    prev_status: TrackStatus,
    not_found_count: u64,
    has_detection: bool,
    params: &Params,
) -> Transition {
    if has_detection {
        return Transition {
            status: TrackStatus::Found,
            not_found_count: 0,
            search_triggered: false,
        };
    }

    let count = not_found_count.saturating_add(1);

    if count < params.waiting_threshold {
        // Only coast if we had something to coast on
        let status = match prev_status {
            TrackStatus::Found | TrackStatus::Waiting => TrackStatus::Waiting,
            TrackStatus::NotFound => TrackStatus::NotFound,
        };

        Transition {
            status,
            not_found_count: count,
            search_triggered: false,
        }
    } else if count > params.not_found_threshold {
        Transition {
            status: TrackStatus::NotFound,
            not_found_count: 0,
            search_triggered: true,
        }
    } else {
        Transition {
            status: TrackStatus::NotFound,
            not_found_count: count,
            search_triggered: false,
        }
    }
}
