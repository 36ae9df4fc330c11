//! # Telecommand module
//!
//! This module provides the telecommands accepted by the tracker. Telecommands are JSON objects
//! with a `type` and a `payload`:
//!
//! - `{"type": "TRACK", "payload": "start"}` - change the tracking mode, see [`TrackCmd`].
//! - `{"type": "DETECT", "payload": {"candidates": [...]}}` - a detection report.
//! - `{"type": "SEARCH", "payload": false}` - turn scanning on loss on or off.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod ball_tracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use serde_json::{self, Value};
use thiserror::Error;

// Internal
use crate::eqpt::detection::DetectionSet;
use ball_tracker::TrackCmd;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction or report sent to the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tc {
    /// Change the tracking mode
    Track(TrackCmd),

    /// Candidates reported by the detector
    Detections(DetectionSet),

    /// Enable or disable scanning when the ball is lost
    SearchOnLoss(bool),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e))
        };

        // Get the type of the TC
        let tc_type = match val["type"].as_str() {
            Some(s) => s,
            None => return Err(TcParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        // All TCs have a payload
        let payload = &val["payload"];
        if payload.is_null() {
            return Err(TcParseError::MissingPayload(tc_type.to_string()))
        }

        match tc_type {
            "TRACK" => {
                let cmd_str = payload.as_str().ok_or_else(|| TcParseError::InvalidPayload(
                    tc_type.to_string(),
                    String::from("Expected a command string")
                ))?;

                match TrackCmd::from_cmd_str(cmd_str) {
                    Some(c) => Ok(Tc::Track(c)),
                    None => Err(TcParseError::InvalidPayload(
                        tc_type.to_string(),
                        format!("{} is not a recognised tracking command", cmd_str)
                    ))
                }
            },
            "DETECT" => {
                match serde_json::from_value::<DetectionSet>(payload.clone()) {
                    Ok(d) => Ok(Tc::Detections(d)),
                    Err(e) => Err(TcParseError::InvalidPayload(
                        tc_type.to_string(),
                        format!("{}", e)
                    ))
                }
            },
            "SEARCH" => match payload.as_bool() {
                Some(b) => Ok(Tc::SearchOnLoss(b)),
                None => Err(TcParseError::InvalidPayload(
                    tc_type.to_string(),
                    String::from("Expected true or false")
                ))
            },
            t => Err(TcParseError::InvalidType(
                format!("{} is not a recognised TC type", t)
            ))
        }
    }
}
