//! # Head demands
//!
//! Commands sent from the tracker to the head. The head control collaborator executes angle
//! offsets relative to the current joint positions, and runs its own scan routine on request.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Demands that are sent from the tracker to the head.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeadDems {
    /// Move the head by the given offsets.
    AngleOffset {
        /// Pan offset in radians. Positive pans to the left.
        pan_rad: f64,

        /// Tilt offset in radians. Positive tilts upwards.
        tilt_rad: f64,
    },

    /// Start the head's search scan.
    Scan,
}

/// IDs of the head joints
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum HeadJointId {
    HeadPan,
    HeadTilt,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HeadJointId {
    /// Name of the joint as used by the joint control subsystem.
    pub fn joint_name(&self) -> &'static str {
        match self {
            HeadJointId::HeadPan => "head_pan",
            HeadJointId::HeadTilt => "head_tilt",
        }
    }
}

impl HeadDems {
    /// Get the per-joint offsets of this demand, pan first. A scan has none.
    pub fn joint_offsets(&self) -> Vec<(HeadJointId, f64)> {
        match *self {
            HeadDems::AngleOffset { pan_rad, tilt_rad } => vec![
                (HeadJointId::HeadPan, pan_rad),
                (HeadJointId::HeadTilt, tilt_rad),
            ],
            HeadDems::Scan => vec![],
        }
    }
}
