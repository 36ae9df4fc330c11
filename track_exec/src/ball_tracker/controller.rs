//! # Ball tracker controller
//!
//! Conversion of image positions into angular errors, and the PD filter applied to those errors.

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PD controller.
///
/// Unlike a stateful PID the previous error and elapsed time are passed in, since the tracker
/// remembers the raw error rather than the filtered one and coasts on it while waiting.
#[derive(Debug, Copy, Clone)]
pub struct PdController {
    /// Proportional gain
    k_p: f64,

    /// Dervative gain
    k_d: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PdController {

    /// Create a new controller with the given gains.
    pub fn new(k_p: f64, k_d: f64) -> Self {
        Self { k_p, k_d }
    }

    /// Get the value of the controller for the given error.
    ///
    /// If there's no usable time difference (first cycle, a clock that hasn't moved or has gone
    /// backwards) there is no derivative term.
    pub fn get(&self, error: f64, prev_error: f64, dt_s: Option<f64>) -> f64 {
        let deriv = match dt_s {
            Some(t) if t.is_finite() && t > 0.0 => (error - prev_error) / t,
            _ => 0f64,
        };

        self.k_p * error + self.k_d * deriv
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Angular error of a normalised image coordinate.
///
/// A coordinate of +1 lies at the edge of the half field of view. The sign is flipped so that a
/// ball towards the top-left (negative coordinates) gives a positive error.
pub fn fov_error(coord: f64, half_fov_rad: f64) -> f64 {
    -(coord * half_fov_rad.tan()).atan()
}

/// True if either axis of a demand is large enough to be worth sending.
pub fn exceeds_deadband(pan_rad: f64, tilt_rad: f64, min_angle_rad: f64) -> bool {
    !(pan_rad.abs() < min_angle_rad && tilt_rad.abs() < min_angle_rad)
}
