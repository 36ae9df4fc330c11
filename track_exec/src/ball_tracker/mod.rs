//! # Ball tracker module
//!
//! The ball tracker keeps the ball centred in the camera's field of view by commanding relative
//! pan/tilt offsets to the head. Each cycle it:
//!
//! 1. Takes the largest candidate reported by the detector since the last cycle (see
//!    [`HeldCandidate`]).
//! 2. Decides the tracking status with [`transition`]:
//!     - `Found` - there is a valid detection this cycle,
//!     - `Waiting` - the ball was seen recently but not this cycle, so the head coasts on a
//!       decayed copy of the last error,
//!     - `NotFound` - there is no usable target and nothing is commanded.
//! 3. Converts the target position into an angular error, filters it through a PD controller,
//!    and sends the result to the head if it is larger than the deadband.
//!
//! If the ball stays lost for long enough the tracker asks the head to run its search scan.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod aggregator;
mod controller;
mod params;
mod state;
mod transition;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use aggregator::*;
pub use controller::*;
pub use params::*;
pub use state::*;
pub use transition::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during BallTracker operation.
#[derive(Debug, thiserror::Error)]
pub enum BallTrackerError {
    #[error("Failed to load BallTracker parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid BallTracker parameters: {0}")]
    InvalidParams(ParamsError),

    #[error("Failed to initialise the BallTracker archive: {0}")]
    ArchiveError(util::archive::ArchiveError),

    #[error("The BallTracker has not been initialised")]
    NotInitialised,
}
