//! # Data Store

use comms_if::eqpt::head::HeadDems;

use crate::ball_tracker;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Session time at the start of this cycle
    pub time_s: f64,

    // BallTracker
    pub tracker: ball_tracker::BallTracker,
    pub tracker_input: ball_tracker::InputData,
    pub tracker_output: ball_tracker::OutputData,
    pub tracker_status_rpt: ball_tracker::StatusReport,

    /// Demands produced outside of cyclic processing this cycle, i.e. the
    /// final correction when tracking is stopped.
    pub pending_dems: Vec<HeadDems>,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle.
    pub fn cycle_start(&mut self, time_s: f64) {
        self.time_s = time_s;

        self.tracker_input = ball_tracker::InputData { now_s: time_s };
        self.tracker_output = ball_tracker::OutputData::default();
        self.tracker_status_rpt = ball_tracker::StatusReport::default();
        self.pending_dems.clear();
    }

    /// Take all demands for the head produced this cycle, in the order they
    /// were produced.
    pub fn take_dems(&mut self) -> Vec<HeadDems> {
        let mut dems: Vec<HeadDems> = self.pending_dems.drain(..).collect();

        if let Some(d) = self.tracker_output.dems.take() {
            dems.push(d);
        }

        dems
    }
}
