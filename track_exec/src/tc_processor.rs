//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use comms_if::tc::Tc;
use crate::data_store::DataStore;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub fn exec(ds: &mut DataStore, tc: &Tc) {

    // Handle different Tcs
    match tc {
        Tc::Track(cmd) => {
            debug!("Recieved {:?} command", cmd);

            if let Some(dems) = ds.tracker.command(*cmd) {
                ds.pending_dems.push(dems);
            }
        },
        Tc::Detections(set) => {
            trace!("Recieved {} candidates", set.candidates.len());
            ds.tracker.report_detections(&set.candidates);
        },
        Tc::SearchOnLoss(enabled) => {
            debug!("Recieved search on loss = {}", enabled);
            ds.tracker.set_use_search(*enabled);
        }
    }

}
