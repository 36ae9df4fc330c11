//! # Tracking Executable Parameters
//!
//! This module provide parameters for the tracking executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackExecParams {

    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Log level for the tracker's per-cycle output, one of the `log` level
    /// names (e.g. "info" or "trace").
    pub tick_log_level: String,
}
