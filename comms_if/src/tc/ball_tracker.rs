//! # Ball tracker telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command changing the tracking mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrackCmd {
    /// Begin tracking. Does nothing if already tracking.
    Start,

    /// Stop tracking, issuing one final correction towards the last seen ball position.
    Stop,

    /// Start if not tracking, otherwise stop.
    Toggle,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrackCmd {
    /// Parse a command from its string form, or `None` if the string isn't a known command.
    pub fn from_cmd_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(TrackCmd::Start),
            "stop" => Some(TrackCmd::Stop),
            "toggle" | "toggle_start" => Some(TrackCmd::Toggle),
            _ => None,
        }
    }
}
