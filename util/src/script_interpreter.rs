//! # Tracker script interpreter module
//!
//! This module provides an interpreter for timed telecommand scripts, allowing
//! detection reports and tracking commands to be replayed into the tracker.
//!
//! A script is a sequence of `<time_s>: <json tc>;` entries, for example:
//!
//! ```text
//! 0.0: {"type": "TRACK", "payload": "start"};
//! 0.1: {"type": "DETECT", "payload": {"candidates": [{"x": 0.2, "y": 0.0, "size": 12.0}]}};
//! ```
//!
//! Tracking commands which aren't recognised are skipped with a warning, so
//! they leave the tracker as it was.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs_at` to acquire a list of telecommands that need executing.
#[derive(Debug)]
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

#[derive(Debug)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.display().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let mut si = Self::from_script(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Each entry is a timestamp, a colon, and a JSON TC terminated by a
        // semicolon.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Parse the exec time
            let exec_time_s: f64 = match cap[1].parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = match Tc::from_json(&cap[3]) {
                Ok(c) => c,
                Err(TcParseError::InvalidPayload(ref t, ref msg)) if t == "TRACK" => {
                    warn!("Ignoring tracking command at {} s: {}", exec_time_s, msg);
                    continue;
                },
                Err(e) => return Err(ScriptError::InvalidTc(
                    exec_time_s, e
                ))
            };

            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs which are due at the given time.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop every command whose exec time has passed. Scripts are written in
        // time order so we can stop at the first one that is still due.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s >= current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if tc_vec.is_empty() {
            PendingTcs::None
        }
        else {
            PendingTcs::Some(tc_vec)
        }
    }

    /// Get the path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    /// Get the number of TCs in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::ball_tracker::TrackCmd;

    const SCRIPT: &str = r#"
        0.0: {"type": "TRACK", "payload": "start"};
        0.5: {"type": "DETECT", "payload": {"candidates": [{"x": 0.1, "y": -0.2, "size": 4.0}]}};
        1.5: {"type": "TRACK", "payload": "stop"};
    "#;

    #[test]
    fn test_script_parse() {
        let si = ScriptInterpreter::from_script(SCRIPT).unwrap();
        assert_eq!(si.get_num_tcs(), 3);
        assert_eq!(si.get_duration(), 1.5);
        assert!(si.script_path().is_none());
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_script(SCRIPT).unwrap();

        match si.get_pending_tcs_at(0.6) {
            PendingTcs::Some(tcs) => {
                assert_eq!(tcs.len(), 2);
                assert_eq!(tcs[0], Tc::Track(TrackCmd::Start));
                match &tcs[1] {
                    Tc::Detections(d) => assert_eq!(d.candidates.len(), 1),
                    tc => panic!("Expected detections, got {:?}", tc)
                }
            },
            p => panic!("Expected pending TCs, got {:?}", p)
        }

        match si.get_pending_tcs_at(1.0) {
            PendingTcs::None => (),
            p => panic!("Expected no TCs, got {:?}", p)
        }

        match si.get_pending_tcs_at(2.0) {
            PendingTcs::Some(tcs) => assert_eq!(tcs, vec![Tc::Track(TrackCmd::Stop)]),
            p => panic!("Expected the stop TC, got {:?}", p)
        }

        match si.get_pending_tcs_at(3.0) {
            PendingTcs::EndOfScript => (),
            p => panic!("Expected end of script, got {:?}", p)
        }
    }

    #[test]
    fn test_unknown_track_command_is_skipped() {
        let mut si = ScriptInterpreter::from_script(r#"
            0.0: {"type": "TRACK", "payload": "start"};
            0.5: {"type": "TRACK", "payload": "pause"};
            1.0: {"type": "TRACK", "payload": "stop"};
        "#).unwrap();

        assert_eq!(si.get_num_tcs(), 2);
        assert_eq!(si.get_duration(), 1.0);

        match si.get_pending_tcs_at(2.0) {
            PendingTcs::Some(tcs) => assert_eq!(
                tcs, vec![Tc::Track(TrackCmd::Start), Tc::Track(TrackCmd::Stop)]
            ),
            p => panic!("Expected both valid TCs, got {:?}", p)
        }

        // A script holding nothing but unknown commands is empty
        match ScriptInterpreter::from_script(r#"0.0: {"type": "TRACK", "payload": "pause"};"#) {
            Err(ScriptError::ScriptEmpty) => (),
            r => panic!("Expected empty script error, got {:?}", r)
        }
    }

    #[test]
    fn test_bad_scripts() {
        match ScriptInterpreter::from_script("nothing to see here") {
            Err(ScriptError::ScriptEmpty) => (),
            r => panic!("Expected empty script error, got {:?}", r)
        }

        match ScriptInterpreter::from_script(r#"1.0: {"type": "WARP"};"#) {
            Err(ScriptError::InvalidTc(t, _)) => assert_eq!(t, 1.0),
            r => panic!("Expected invalid TC error, got {:?}", r)
        }

        match ScriptInterpreter::new("/no/such/script.trs") {
            Err(ScriptError::ScriptNotFound(_)) => (),
            r => panic!("Expected script not found, got {:?}", r)
        }
    }
}
