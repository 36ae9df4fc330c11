//! # Detection reports
//!
//! Ball candidates as reported by the detector. Positions are normalised image coordinates, with
//! the top-left of the image at (-1, -1) and the bottom-right at (+1, +1).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single ball candidate.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Horizontal position, -1 at the left edge and +1 at the right edge.
    pub x: f64,

    /// Vertical position, -1 at the top edge and +1 at the bottom edge.
    pub y: f64,

    /// Apparent size of the ball. Zero or negative means there is no detection.
    #[serde(default)]
    pub size: f64,
}

/// All candidates reported by the detector for one frame.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSet {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Candidate {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    /// True if this candidate is a real detection.
    pub fn is_detection(&self) -> bool {
        self.size > 0.0
    }

    /// True if the position and size are all finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size.is_finite()
    }
}
