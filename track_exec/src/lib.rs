//! # Ball tracking library.
//!
//! This library allows other crates in the workspace, and the benchmarks, to access items defined
//! inside the tracking executable.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Ball tracker - turns ball detections into head demands
pub mod ball_tracker;

/// Data store - all data owned by the executable for one cycle
pub mod data_store;

/// Executable parameters
pub mod params;

/// Telecommand processor - routes telecommands to the tracker
pub mod tc_processor;
