//! Parameters structure for the BallTracker

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the BallTracker.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- CAMERA ----

    /// Half of the camera's horizontal field of view.
    ///
    /// Units: radians
    pub half_fov_width_rad: f64,

    /// Half of the camera's vertical field of view.
    ///
    /// Units: radians
    pub half_fov_height_rad: f64,

    // ---- LOSS HANDLING ----

    /// Number of consecutive cycles without a detection below which the
    /// tracker keeps coasting on the last known error.
    ///
    /// Units: cycles
    pub waiting_threshold: u64,

    /// Number of consecutive cycles without a detection above which the ball
    /// is considered lost and a scan may be requested.
    ///
    /// Units: cycles
    pub not_found_threshold: u64,

    /// If true a scan is requested from the head when the ball is lost.
    pub use_search_on_loss: bool,

    /// Factor applied to the last error on each waiting cycle.
    #[serde(default = "default_waiting_decay")]
    pub waiting_decay: f64,

    // ---- CONTROL ----

    /// Demands with both axes smaller than this are not sent.
    ///
    /// Units: radians
    pub min_command_angle_rad: f64,

    /// Proportional gain
    pub p_gain: f64,

    /// Derivative gain
    ///
    /// Units: seconds
    pub d_gain: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a parameter set can be rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("Half field of view must be between 0 and 90 degrees, found {0} rad")]
    InvalidFov(f64),

    #[error("The waiting threshold must be at least one cycle")]
    ZeroWaitingThreshold,

    #[error(
        "The not found threshold ({not_found}) must not be less than the waiting \
         threshold ({waiting})"
    )]
    ThresholdOrder { waiting: u64, not_found: u64 },

    #[error("The minimum command angle must be finite and not negative, found {0}")]
    InvalidMinAngle(f64),

    #[error("The proportional gain must be finite and positive, found {0}")]
    InvalidPGain(f64),

    #[error("The derivative gain must be finite and not negative, found {0}")]
    InvalidDGain(f64),

    #[error("The waiting decay must be between 0 and 1, found {0}")]
    InvalidDecay(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            half_fov_width_rad: 13.2f64.to_radians(),
            half_fov_height_rad: 10.8f64.to_radians(),
            waiting_threshold: 5,
            not_found_threshold: 50,
            use_search_on_loss: true,
            waiting_decay: default_waiting_decay(),
            min_command_angle_rad: 1f64.to_radians(),
            p_gain: 0.75,
            d_gain: 0.04,
        }
    }
}

impl Params {
    /// Check that the parameters describe a usable tracker.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for fov in [self.half_fov_width_rad, self.half_fov_height_rad].iter() {
            if !fov.is_finite() || *fov <= 0.0 || *fov >= std::f64::consts::FRAC_PI_2 {
                return Err(ParamsError::InvalidFov(*fov));
            }
        }

        if self.waiting_threshold == 0 {
            return Err(ParamsError::ZeroWaitingThreshold);
        }

        if self.not_found_threshold < self.waiting_threshold {
            return Err(ParamsError::ThresholdOrder {
                waiting: self.waiting_threshold,
                not_found: self.not_found_threshold,
            });
        }

        if !self.min_command_angle_rad.is_finite() || self.min_command_angle_rad < 0.0 {
            return Err(ParamsError::InvalidMinAngle(self.min_command_angle_rad));
        }

        if !self.p_gain.is_finite() || self.p_gain <= 0.0 {
            return Err(ParamsError::InvalidPGain(self.p_gain));
        }

        if !self.d_gain.is_finite() || self.d_gain < 0.0 {
            return Err(ParamsError::InvalidDGain(self.d_gain));
        }

        if !(0.0..=1.0).contains(&self.waiting_decay) {
            return Err(ParamsError::InvalidDecay(self.waiting_decay));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_waiting_decay() -> f64 {
    0.7
}
